use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Subunits per display unit. Fixed by the ledger protocol.
pub const SUBUNITS_PER_PFT: u64 = 1_000_000;

/// Opaque continuation marker returned by the ledger feed.
/// Only ever handed back to the next request, never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub Value);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerTransaction {
    #[serde(rename = "Account", default)]
    pub sender: String,
    #[serde(rename = "Destination", default)]
    pub destination: Option<String>,
    #[serde(rename = "TransactionType", default)]
    pub kind: String,
    /// Filled in from the transaction metadata by the feed client
    #[serde(skip, default = "assume_success")]
    pub success: bool,
    /// Every other protocol field, including the amount aliases
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn assume_success() -> bool {
    true
}

impl LedgerTransaction {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn is_payment(&self) -> bool {
        self.kind == "Payment"
    }
}

/// One page of the transaction feed. `cursor == None` means the feed is exhausted.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub transactions: Vec<LedgerTransaction>,
    /// Entries the ledger returned, including ones without a usable
    /// transaction body. Zero means the history is exhausted.
    pub received: usize,
    pub cursor: Option<Cursor>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry<M> {
    pub identity: String,
    pub metric: M,
}

impl<M> RankEntry<M> {
    pub fn new(identity: impl Into<String>, metric: M) -> Self {
        Self {
            identity: identity.into(),
            metric,
        }
    }
}

impl<M> AsRef<str> for RankEntry<M> {
    fn as_ref(&self) -> &str {
        &self.identity
    }
}
