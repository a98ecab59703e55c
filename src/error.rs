use thiserror::Error;

/// Failures talking to the ledger. Any of these aborts a feed scan.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("ledger request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ledger rejected {command}: {message}")]
    Rpc {
        command: &'static str,
        message: String,
    },

    #[error("unexpected {command} response: {reason}")]
    Decode {
        command: &'static str,
        reason: String,
    },
}

/// Failures loading the published analytics snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("snapshot request returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("snapshot document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}
