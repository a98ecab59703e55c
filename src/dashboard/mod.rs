//! Dashboard projection of a network snapshot
//!
//! Turns the published snapshot into everything the screen shows:
//! totals, derived ratios, the two rankings (truncated for display),
//! and the dense daily chart. The search overlay reads identities from
//! this projection, so rank numbers always match what is on screen.

pub mod text;

use chrono::NaiveDate;

use crate::config::DashboardConfig;
use crate::densify::{chart_bars, densify, ChartBar};
use crate::format::{format_address, header_timestamp, parse_generated_at};
use crate::ranking::{Metric, RankedList};
use crate::snapshot::{NetworkSnapshot, NetworkTotals};

/// Placeholder for values the snapshot did not supply
pub const MISSING: &str = "--";

/// Ratios derived from the network totals. A zero denominator yields 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub avg_reward_size: f64,
    pub submissions_rewarded_pct: f64,
    pub avg_earnings: f64,
}

fn ratio(numerator: f64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

impl DerivedMetrics {
    pub fn from_totals(totals: &NetworkTotals) -> Self {
        Self {
            avg_reward_size: ratio(totals.total_pft_distributed, totals.total_rewards_paid),
            submissions_rewarded_pct: ratio(
                totals.total_rewards_paid as f64,
                totals.total_submissions,
            ) * 100.0,
            avg_earnings: ratio(totals.total_pft_distributed, totals.unique_earners),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressRow<M> {
    /// 1-indexed
    pub rank: usize,
    pub address: String,
    pub short_address: String,
    pub explorer_url: String,
    pub metric: M,
}

impl<M> AddressRow<M> {
    /// Top-three leaderboard position, if any
    pub fn podium(&self) -> Option<usize> {
        (self.rank <= 3).then_some(self.rank)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// `Data generated ... from XRPL chain`, or `None` when the snapshot has no timestamp
    pub header: Option<String>,
    pub last_updated: String,
    pub totals: NetworkTotals,
    pub derived: DerivedMetrics,
    pub leaderboard: Vec<AddressRow<f64>>,
    pub daily: Vec<ChartBar>,
    pub submitters: Vec<AddressRow<u64>>,
    pub window_days: u32,
}

fn address_rows<M: Metric>(
    ranking: &RankedList<M>,
    rows: usize,
    explorer_base_url: &str,
) -> Vec<AddressRow<M>> {
    let base = explorer_base_url.trim_end_matches('/');
    ranking
        .top_n(rows)
        .iter()
        .enumerate()
        .map(|(i, entry)| AddressRow {
            rank: i + 1,
            address: entry.identity.clone(),
            short_address: format_address(&entry.identity),
            explorer_url: format!("{}/accounts/{}", base, entry.identity),
            metric: entry.metric,
        })
        .collect()
}

impl DashboardView {
    pub fn render(snapshot: &NetworkSnapshot, config: &DashboardConfig, today: NaiveDate) -> Self {
        let totals = snapshot.network_totals.clone();

        let earners = RankedList::build(
            snapshot
                .rewards
                .leaderboard
                .iter()
                .map(|entry| (entry.address.as_str(), entry.total_pft)),
        );
        let submitters = RankedList::build(
            snapshot
                .submissions
                .top_submitters
                .iter()
                .map(|entry| (entry.address.as_str(), entry.submissions)),
        );

        let daily = chart_bars(&densify(
            &snapshot.rewards.daily_series(),
            config.window_days,
            today,
        ));

        let generated_at = snapshot
            .metadata
            .generated_at
            .as_deref()
            .and_then(parse_generated_at);

        Self {
            header: generated_at
                .as_ref()
                .map(|at| format!("Data generated {} from XRPL chain", header_timestamp(at))),
            last_updated: generated_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            derived: DerivedMetrics::from_totals(&totals),
            totals,
            leaderboard: address_rows(&earners, config.display_rows, &config.explorer_base_url),
            daily,
            submitters: address_rows(&submitters, config.display_rows, &config.explorer_base_url),
            window_days: config.window_days,
        }
    }

    /// Full addresses of the displayed earner rows, in rank order
    pub fn earner_identities(&self) -> Vec<&str> {
        self.leaderboard.iter().map(|row| row.address.as_str()).collect()
    }

    /// Full addresses of the displayed submitter rows, in rank order
    pub fn submitter_identities(&self) -> Vec<&str> {
        self.submitters.iter().map(|row| row.address.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{LeaderboardEntry, SubmitterEntry};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
    }

    #[test]
    fn test_derived_metrics_guard_zero_denominators() {
        let metrics = DerivedMetrics::from_totals(&NetworkTotals::default());
        assert_eq!(metrics.avg_reward_size, 0.0);
        assert_eq!(metrics.submissions_rewarded_pct, 0.0);
        assert_eq!(metrics.avg_earnings, 0.0);
    }

    #[test]
    fn test_derived_metrics_values() {
        let metrics = DerivedMetrics::from_totals(&NetworkTotals {
            total_pft_distributed: 3000.0,
            unique_earners: 4,
            total_rewards_paid: 6,
            total_submissions: 8,
            unique_submitters: 5,
        });
        assert_eq!(metrics.avg_reward_size, 500.0);
        assert_eq!(metrics.submissions_rewarded_pct, 75.0);
        assert_eq!(metrics.avg_earnings, 750.0);
    }

    #[test]
    fn test_rows_truncated_and_linked() {
        let mut snapshot = NetworkSnapshot::default();
        snapshot.rewards.leaderboard = (0..15)
            .map(|i| LeaderboardEntry {
                address: format!("rEarner{:02}", i),
                total_pft: i as f64,
            })
            .collect();
        snapshot.submissions.top_submitters = vec![SubmitterEntry {
            address: "rSubmitter".into(),
            submissions: 3,
        }];

        let view = DashboardView::render(&snapshot, &DashboardConfig::default(), today());

        assert_eq!(view.leaderboard.len(), 10);
        assert_eq!(view.leaderboard[0].address, "rEarner14");
        assert_eq!(view.leaderboard[0].podium(), Some(1));
        assert_eq!(view.leaderboard[3].podium(), None);
        assert_eq!(
            view.leaderboard[0].explorer_url,
            "https://testnet.xrpl.org/accounts/rEarner14"
        );
        assert_eq!(view.submitter_identities(), vec!["rSubmitter"]);
    }

    #[test]
    fn test_missing_timestamp_renders_placeholder() {
        let view = DashboardView::render(
            &NetworkSnapshot::default(),
            &DashboardConfig::default(),
            today(),
        );

        assert_eq!(view.header, None);
        assert_eq!(view.last_updated, MISSING);
        assert_eq!(view.daily.len(), 14);
        assert!(view.leaderboard.is_empty());
    }
}
