//! Live address search over the rendered earner and submitter rows.
//!
//! Every input recomputes the whole state from the rows currently on
//! screen; nothing from a previous query is reused.

use std::fmt;

use crate::ranking::{find_rank, identity_matches};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Empty query, rows shown unmarked
    Idle,
    /// Non-empty query, every row matched or dimmed
    Filtering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMark {
    Unmarked,
    Matched,
    Dimmed,
}

/// Best rank among the matches in one list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankClause {
    pub rank: usize,
    pub of: usize,
    pub matches: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Idle,
    NoResults,
    Found {
        earners: Option<RankClause>,
        submitters: Option<RankClause>,
    },
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Idle => Ok(()),
            SearchOutcome::NoResults => write!(f, "No matching addresses"),
            SearchOutcome::Found { earners, submitters } => {
                let parts: Vec<String> = [(earners, "earners"), (submitters, "submitters")]
                    .into_iter()
                    .filter_map(|(clause, noun)| {
                        clause.map(|c| format!("Rank #{} of {} {}", c.rank, c.of, noun))
                    })
                    .collect();
                write!(f, "Found: {}", parts.join(" • "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub earner_marks: Vec<RowMark>,
    pub submitter_marks: Vec<RowMark>,
    pub outcome: SearchOutcome,
}

impl SearchState {
    pub fn match_count(&self) -> usize {
        match self.outcome {
            SearchOutcome::Found { earners, submitters } => {
                earners.map_or(0, |c| c.matches) + submitters.map_or(0, |c| c.matches)
            }
            _ => 0,
        }
    }
}

#[derive(Debug)]
pub struct LiveSearchOverlay {
    mode: SearchMode,
}

impl Default for LiveSearchOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveSearchOverlay {
    pub fn new() -> Self {
        Self {
            mode: SearchMode::Idle,
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Apply the full current query text against the displayed rows
    pub fn on_input<E, S>(&mut self, raw_query: &str, earners: &[E], submitters: &[S]) -> SearchState
    where
        E: AsRef<str>,
        S: AsRef<str>,
    {
        let query = raw_query.trim().to_lowercase();

        if query.is_empty() {
            self.mode = SearchMode::Idle;
            return SearchState {
                query,
                earner_marks: vec![RowMark::Unmarked; earners.len()],
                submitter_marks: vec![RowMark::Unmarked; submitters.len()],
                outcome: SearchOutcome::Idle,
            };
        }

        self.mode = SearchMode::Filtering;
        let (earner_marks, earner_clause) = scan_rows(&query, earners);
        let (submitter_marks, submitter_clause) = scan_rows(&query, submitters);

        let outcome = if earner_clause.is_none() && submitter_clause.is_none() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Found {
                earners: earner_clause,
                submitters: submitter_clause,
            }
        };

        SearchState {
            query,
            earner_marks,
            submitter_marks,
            outcome,
        }
    }
}

fn scan_rows<R: AsRef<str>>(needle: &str, rows: &[R]) -> (Vec<RowMark>, Option<RankClause>) {
    let marks: Vec<RowMark> = rows
        .iter()
        .map(|row| {
            if identity_matches(row.as_ref(), needle) {
                RowMark::Matched
            } else {
                RowMark::Dimmed
            }
        })
        .collect();
    let matches = marks.iter().filter(|mark| **mark == RowMark::Matched).count();

    let clause = find_rank(needle, rows).map(|rank| RankClause {
        rank,
        of: rows.len(),
        matches,
    });
    (marks, clause)
}
