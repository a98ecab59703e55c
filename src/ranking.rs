//! Ranked lists and rank lookup by identity substring.
//!
//! Rankings sort descending by metric with a stable sort, so equal metrics
//! keep their input order. Rank lookups must run against the same list
//! that is displayed; never sort a second copy for searching.

use std::cmp::Ordering;

use crate::types::RankEntry;

/// Total ordering over a ranking metric
pub trait Metric: Copy {
    fn compare(&self, other: &Self) -> Ordering;
}

impl Metric for f64 {
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Metric for u64 {
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedList<M> {
    entries: Vec<RankEntry<M>>,
}

impl<M: Metric> RankedList<M> {
    pub fn build<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, M)>,
        S: Into<String>,
    {
        let mut entries: Vec<RankEntry<M>> = pairs
            .into_iter()
            .map(|(identity, metric)| RankEntry::new(identity, metric))
            .collect();
        entries.sort_by(|a, b| b.metric.compare(&a.metric));
        Self { entries }
    }

    pub fn entries(&self) -> &[RankEntry<M>] {
        &self.entries
    }

    /// The first `n` entries (fewer if the list is shorter)
    pub fn top_n(&self, n: usize) -> &[RankEntry<M>] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// 1-indexed rank of the first entry whose identity contains `query`
    pub fn find_rank(&self, query: &str) -> Option<usize> {
        find_rank(query, &self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Case-insensitive substring match. `needle` must already be lower-cased.
pub fn identity_matches(identity: &str, needle: &str) -> bool {
    identity.to_lowercase().contains(needle)
}

/// 1-indexed position of the highest-ranked entry whose identity contains
/// `query` (case-insensitive), or `None` when nothing matches.
/// Works on ranked entries and on plain identity rows alike.
pub fn find_rank<R: AsRef<str>>(query: &str, rows: &[R]) -> Option<usize> {
    let needle = query.to_lowercase();
    rows.iter()
        .position(|row| identity_matches(row.as_ref(), &needle))
        .map(|index| index + 1)
}
