use tracing_subscriber::{fmt, EnvFilter};

use crate::config::MonitoringConfig;

/// Initialize tracing. `RUST_LOG` wins over the configured level.
/// Logs go to stderr so stdout stays clean for the rendered output.
pub fn init_logging(config: &MonitoringConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if config.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}
