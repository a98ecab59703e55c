// PFT Analytics
// Ledger payment classification for a tracked account, plus the ranked and
// time-bucketed views behind the live network dashboard

pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod densify;
pub mod error;
pub mod feed;
pub mod format;
pub mod logging;
pub mod ranking;
pub mod refresh;
pub mod search;
pub mod snapshot;
pub mod types;

pub use classifier::{ClassificationResult, PaymentClassifier};
pub use dashboard::DashboardView;
pub use feed::{PaginatedFeedReader, TransactionFeed};
pub use ranking::RankedList;
pub use search::LiveSearchOverlay;
