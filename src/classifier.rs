//! Inbound payment classifier
//!
//! Folds an account's transaction history into two buckets:
//! - payments from known reward wallets (the allow-list)
//! - payments from anyone else, with a running total per sender
//!
//! Only successful `Payment` transactions whose destination is the tracked
//! account and whose delivered amount is a positive integer count. Anything
//! else contributes nothing and is not an error.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::ranking::RankedList;
use crate::types::{LedgerTransaction, SUBUNITS_PER_PFT};

/// Amount field names, highest priority first.
/// `DeliverMax` replaced the legacy `Amount` field in newer API versions.
pub const DEFAULT_AMOUNT_ALIASES: [&str; 2] = ["DeliverMax", "Amount"];

/// Conventional size of the "top other senders" listing
pub const TOP_OTHER_SENDERS: usize = 5;

/// Ordered list of field names that may carry the delivered amount
#[derive(Debug, Clone, PartialEq)]
pub struct AmountAliases(Vec<String>);

impl AmountAliases {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// First alias present on the transaction (null and empty strings count as absent)
    pub fn resolve<'t>(&self, tx: &'t LedgerTransaction) -> Option<&'t Value> {
        self.0.iter().find_map(|name| {
            tx.field(name)
                .filter(|value| !value.is_null() && value.as_str() != Some(""))
        })
    }

    /// Delivered amount in subunits. `None` for non-native (object) amounts,
    /// unparsable strings, zero and negative values.
    pub fn delivered_subunits(&self, tx: &LedgerTransaction) -> Option<u64> {
        let raw = self.resolve(tx)?.as_str()?;
        let parsed: i128 = raw.trim().parse().ok()?;
        if parsed <= 0 {
            return None;
        }
        u64::try_from(parsed).ok()
    }
}

impl Default for AmountAliases {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT_ALIASES)
    }
}

/// Per-sender running totals, kept in first-seen order so that ranking
/// ties resolve deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtherSenders {
    totals: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl OtherSenders {
    fn add(&mut self, sender: &str, subunits: u64) {
        match self.index.get(sender) {
            Some(&i) => self.totals[i].1 = self.totals[i].1.saturating_add(subunits),
            None => {
                self.index.insert(sender.to_string(), self.totals.len());
                self.totals.push((sender.to_string(), subunits));
            }
        }
    }

    /// Accumulated subunits from `sender`
    pub fn get(&self, sender: &str) -> Option<u64> {
        self.index.get(sender).map(|&i| self.totals[i].1)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(sender, total)| (sender.as_str(), *total))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    known_subunits: u64,
    other_subunits: u64,
    other_senders: OtherSenders,
    scale: u64,
}

impl ClassificationResult {
    fn empty(scale: u64) -> Self {
        Self {
            known_subunits: 0,
            other_subunits: 0,
            other_senders: OtherSenders::default(),
            scale,
        }
    }

    fn to_display(&self, subunits: u64) -> f64 {
        subunits as f64 / self.scale as f64
    }

    /// Total received from allow-listed senders, in PFT
    pub fn known_total(&self) -> f64 {
        self.to_display(self.known_subunits)
    }

    /// Total received from everyone else, in PFT
    pub fn other_total(&self) -> f64 {
        self.to_display(self.other_subunits)
    }

    pub fn total(&self) -> f64 {
        self.to_display(self.known_subunits.saturating_add(self.other_subunits))
    }

    pub fn other_senders(&self) -> &OtherSenders {
        &self.other_senders
    }

    /// Full (untruncated) ranking of other senders by PFT received
    pub fn other_sender_ranking(&self) -> RankedList<f64> {
        RankedList::build(
            self.other_senders
                .iter()
                .map(|(sender, subunits)| (sender, self.to_display(subunits))),
        )
    }
}

/// Where an inbound payment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentSource {
    Known,
    Other,
}

pub struct PaymentClassifier {
    target: String,
    known_sources: HashSet<String>,
    aliases: AmountAliases,
    scale: u64,
}

impl PaymentClassifier {
    pub fn new<I, S>(target: impl Into<String>, known_sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target: target.into(),
            known_sources: known_sources.into_iter().map(Into::into).collect(),
            aliases: AmountAliases::default(),
            scale: SUBUNITS_PER_PFT,
        }
    }

    pub fn with_aliases(mut self, aliases: AmountAliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_scale(mut self, scale: u64) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Bucket and amount for a single transaction, or `None` if it does not count
    pub fn contribution(&self, tx: &LedgerTransaction) -> Option<(PaymentSource, u64)> {
        if !tx.is_payment() || !tx.success {
            return None;
        }
        if tx.destination.as_deref() != Some(self.target.as_str()) {
            return None;
        }

        let Some(subunits) = self.aliases.delivered_subunits(tx) else {
            debug!("Skipping payment from {} with no positive native amount", tx.sender);
            return None;
        };

        let source = if self.known_sources.contains(&tx.sender) {
            PaymentSource::Known
        } else {
            PaymentSource::Other
        };
        Some((source, subunits))
    }

    pub fn classify<'a, I>(&self, transactions: I) -> ClassificationResult
    where
        I: IntoIterator<Item = &'a LedgerTransaction>,
    {
        let mut result = ClassificationResult::empty(self.scale);

        for tx in transactions {
            match self.contribution(tx) {
                Some((PaymentSource::Known, subunits)) => {
                    result.known_subunits = result.known_subunits.saturating_add(subunits);
                }
                Some((PaymentSource::Other, subunits)) => {
                    result.other_subunits = result.other_subunits.saturating_add(subunits);
                    result.other_senders.add(&tx.sender, subunits);
                }
                None => {}
            }
        }

        result
    }
}
