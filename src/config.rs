use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_CANDIDATES: [&str; 2] = ["config.toml", "config.example.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub rpc: RpcConfig,
    pub tracking: TrackingConfig,
    pub dashboard: DashboardConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Ledger JSON-RPC endpoint
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Transactions requested per `account_tx` page
    pub page_size: u32,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://rpc.testnet.postfiat.org".to_string(),
            timeout_secs: 30,
            page_size: 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Account whose inbound payments are classified
    pub tracked_address: String,
    /// Primary and relay reward wallets; payments from these count as rewards
    pub reward_addresses: Vec<String>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tracked_address: "rDqf4nowC2PAZgn1UGHDn46mcUMREYJrsr".to_string(),
            reward_addresses: vec![
                "rGBKxoTcavpfEso7ASRELZAMcCMqKa8oFk".to_string(),
                "rKt4peDozpRW9zdYGiTZC54DSNU3Af6pQE".to_string(),
                "rJNwqDPKSkbqDPNoNxbW6C3KCS84ZaQc96".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub snapshot_url: String,
    pub fetch_timeout_secs: u64,
    pub refresh_interval_secs: u64,
    /// Days shown in the daily distribution chart
    pub window_days: u32,
    /// Rows shown per ranking
    pub display_rows: usize,
    pub explorer_base_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            snapshot_url: "http://localhost:5173/data/network.json".to_string(),
            fetch_timeout_secs: 10,
            refresh_interval_secs: 60,
            window_days: 14,
            display_rows: 10,
            explorer_base_url: "https://testnet.xrpl.org".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: String,
    pub json_logs: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// `config.toml`, then `config.example.toml`, then built-in defaults.
    /// A file that exists but does not parse is an error.
    pub fn load_or_default() -> Result<Self> {
        for candidate in CONFIG_CANDIDATES {
            if Path::new(candidate).exists() {
                return Self::load(candidate);
            }
        }
        Ok(Self::default())
    }
}
