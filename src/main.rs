// PFT Analytics - Live Network Dashboard
// Loads the published network snapshot, renders it to the terminal and
// re-renders on every refresh. Each stdin line replaces the search query;
// an empty line clears it.

use anyhow::{Context, Result};
use chrono::Utc;
use pft_analytics::config::Config;
use pft_analytics::dashboard::DashboardView;
use pft_analytics::logging::init_logging;
use pft_analytics::refresh::start_polling;
use pft_analytics::search::LiveSearchOverlay;
use pft_analytics::snapshot::{HttpSnapshotSource, SnapshotSource};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::load_or_default()?;
    init_logging(&config.monitoring);

    info!("🚀 PFT Analytics dashboard starting...");

    let source = HttpSnapshotSource::new(&config.dashboard).context("Failed to create snapshot client")?;
    info!("📡 Snapshot: {}", source.url());
    let source: Arc<dyn SnapshotSource> = Arc::new(source);

    let snapshot = match source.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("❌ Initial snapshot load failed: {}", e);
            eprintln!("Failed to load network data.");
            return Err(e).context("Initial snapshot load failed");
        }
    };

    let initial = DashboardView::render(&snapshot, &config.dashboard, Utc::now().date_naive());
    let (views_tx, mut views_rx) = watch::channel(Some(Arc::new(initial)));
    let handle = start_polling(None, source, config.dashboard.clone(), views_tx);

    let mut overlay = LiveSearchOverlay::new();
    let mut query = String::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    render(&views_rx.borrow_and_update(), &mut overlay, &query);

    loop {
        tokio::select! {
            changed = views_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&views_rx.borrow_and_update(), &mut overlay, &query);
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => {
                        query = line;
                        render(&views_rx.borrow(), &mut overlay, &query);
                    }
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        error!("❌ stdin read failed: {}", e);
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("🛑 Shutting down");
                break;
            }
        }
    }

    handle.stop();
    Ok(())
}

/// Print the current view with the query applied to the rows it shows
fn render(view: &Option<Arc<DashboardView>>, overlay: &mut LiveSearchOverlay, query: &str) {
    let Some(view) = view else {
        return;
    };
    let state = overlay.on_input(query, &view.earner_identities(), &view.submitter_identities());
    println!("{}", view.to_text(Some(&state)));
}
