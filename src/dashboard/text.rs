//! Plain-text rendering of the dashboard for terminal output

use std::fmt::{self, Write};

use super::{AddressRow, DashboardView, MISSING};
use crate::format::{format_number, format_pft};
use crate::search::{RowMark, SearchOutcome, SearchState};

/// Columns used by a 100% bar
const BAR_WIDTH: usize = 40;

fn row_prefix(mark: RowMark) -> &'static str {
    match mark {
        RowMark::Unmarked => "  ",
        RowMark::Matched => "▶ ",
        RowMark::Dimmed => "· ",
    }
}

fn mark_at(marks: Option<&[RowMark]>, index: usize) -> RowMark {
    marks
        .and_then(|marks| marks.get(index).copied())
        .unwrap_or(RowMark::Unmarked)
}

fn write_rows<W, M>(
    out: &mut W,
    rows: &[AddressRow<M>],
    marks: Option<&[RowMark]>,
    metric: impl Fn(&M) -> String,
    podium: bool,
) -> fmt::Result
where
    W: Write,
{
    if rows.is_empty() {
        return writeln!(out, "  (no data)");
    }
    for (i, row) in rows.iter().enumerate() {
        let medal = match row.podium().filter(|_| podium) {
            Some(_) => "★",
            None => " ",
        };
        writeln!(
            out,
            "{}#{:<3}{} {:<14} {:>14}   {}",
            row_prefix(mark_at(marks, i)),
            row.rank,
            medal,
            row.short_address,
            metric(&row.metric),
            row.explorer_url
        )?;
    }
    Ok(())
}

impl DashboardView {
    pub fn write_text<W: Write>(&self, out: &mut W, search: Option<&SearchState>) -> fmt::Result {
        writeln!(out, "PFT Analytics")?;
        writeln!(out, "Post Fiat Network Metrics - On-Chain Data")?;
        writeln!(out, "{}", self.header.as_deref().unwrap_or(MISSING))?;

        let t = &self.totals;
        writeln!(out, "\n== Network Overview ==")?;
        writeln!(out, "  {:<24}{}", "Total PFT Distributed", format_pft(t.total_pft_distributed))?;
        writeln!(out, "  {:<24}{}", "Unique Earners", t.unique_earners)?;
        writeln!(out, "  {:<24}{}", "Rewards Paid", t.total_rewards_paid)?;
        writeln!(out, "  {:<24}{}", "Task Submissions", t.total_submissions)?;
        writeln!(out, "  {:<24}{}", "Active Submitters", t.unique_submitters)?;

        let d = &self.derived;
        writeln!(out, "\n== Derived Metrics ==")?;
        writeln!(out, "  {:<24}{}", "Avg Reward Size", format_pft(d.avg_reward_size))?;
        writeln!(out, "  {:<24}{:.1}%", "Submissions Rewarded", d.submissions_rewarded_pct)?;
        writeln!(out, "  {:<24}{}", "Avg Earnings", format_pft(d.avg_earnings))?;

        writeln!(out, "\n== Top Earners ==")?;
        write_rows(
            out,
            &self.leaderboard,
            search.map(|s| s.earner_marks.as_slice()),
            |pft| format_pft(*pft),
            true,
        )?;

        writeln!(out, "\n== Daily PFT Distribution (Last {} Days) ==", self.window_days)?;
        for bar in &self.daily {
            let (fill, width) = if bar.empty {
                ('.', 1)
            } else {
                ('#', ((bar.height_pct / 100.0 * BAR_WIDTH as f64).round() as usize).max(1))
            };
            writeln!(
                out,
                "  {} |{:<bar_width$} {}",
                bar.label,
                fill.to_string().repeat(width),
                format_pft(bar.value),
                bar_width = BAR_WIDTH
            )?;
        }

        writeln!(out, "\n== Most Active Submitters ==")?;
        write_rows(
            out,
            &self.submitters,
            search.map(|s| s.submitter_marks.as_slice()),
            |count| format_number(*count as f64, 0),
            false,
        )?;

        if let Some(state) = search {
            if state.outcome != SearchOutcome::Idle {
                writeln!(out, "\nSearch \"{}\": {}", state.query, state.outcome)?;
            }
        }

        writeln!(out, "\nData sourced from XRPL chain • Last updated: {}", self.last_updated)
    }

    pub fn to_text(&self, search: Option<&SearchState>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_text(&mut out, search);
        out
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, None)
    }
}
