//! Dense daily time series from sparse per-day data
//!
//! The snapshot only lists days with activity. The chart needs every day
//! in a trailing window, so each day is derived by calendar arithmetic from
//! the anchor date and looked up in the sparse map; missing days are zero
//! and sparse entries outside the window are dropped.

use chrono::{Days, NaiveDate};
use std::collections::HashMap;

use crate::types::DailyPoint;

/// Bar height (percent) used for empty days and as a floor for tiny values
pub const MIN_BAR_HEIGHT_PCT: f64 = 2.0;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// `window_days` consecutive days ending at (and including) `today`, oldest first
pub fn densify(sparse: &HashMap<String, f64>, window_days: u32, today: NaiveDate) -> Vec<DailyPoint> {
    (0..u64::from(window_days))
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailyPoint {
            date,
            value: sparse
                .get(&date.format(DATE_KEY_FORMAT).to_string())
                .copied()
                .unwrap_or(0.0),
        })
        .collect()
}

/// One column of the daily chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub date: NaiveDate,
    /// `MM-DD`
    pub label: String,
    pub value: f64,
    pub height_pct: f64,
    /// Zero-value day, drawn at the minimum height but styled apart from small values
    pub empty: bool,
}

/// Scale bars against the window maximum (never below 1)
pub fn chart_bars(points: &[DailyPoint]) -> Vec<ChartBar> {
    let max = points.iter().map(|p| p.value).fold(1.0_f64, f64::max);

    points
        .iter()
        .map(|point| {
            let empty = point.value <= 0.0;
            let height_pct = if empty {
                MIN_BAR_HEIGHT_PCT
            } else {
                (point.value / max * 100.0).max(MIN_BAR_HEIGHT_PCT)
            };
            ChartBar {
                date: point.date,
                label: point.date.format("%m-%d").to_string(),
                value: point.value,
                height_pct,
                empty,
            }
        })
        .collect()
}
