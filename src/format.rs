//! Display formatting for amounts, addresses and timestamps

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Fraction digits shown for PFT amounts on the dashboard
pub const PFT_DECIMALS: usize = 2;

/// Thousands-separated number with at most `max_decimals` fraction digits,
/// trailing zeros trimmed. Non-finite values print as `0`.
pub fn format_number(value: f64, max_decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

pub fn format_pft(value: f64) -> String {
    format_number(value, PFT_DECIMALS)
}

/// `rDqf4n...jrsr` style shortening for long addresses
pub fn format_address(address: &str) -> String {
    let len = address.chars().count();
    if len <= 12 {
        return address.to_string();
    }
    let head: String = address.chars().take(6).collect();
    let tail: String = address.chars().skip(len - 4).collect();
    format!("{}...{}", head, tail)
}

/// Parse the snapshot's generation time. Naive timestamps are taken as UTC.
pub fn parse_generated_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `Jan 31, 2026 at 6:34 PM`
pub fn header_timestamp(at: &DateTime<Utc>) -> String {
    format!("{} at {}", at.format("%b %-d, %Y"), at.format("%-I:%M %p"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping_and_trim() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(1000.0, 2), "1,000");
        assert_eq!(format_number(999.5, 2), "999.5");
        assert_eq!(format_number(0.0, 2), "0");
        assert_eq!(format_number(-2500.25, 2), "-2,500.25");
        assert_eq!(format_number(-0.001, 2), "0");
        assert_eq!(format_number(f64::NAN, 2), "0");
    }

    #[test]
    fn test_format_address() {
        assert_eq!(format_address("rDqf4nowC2PAZgn1UGHDn46mcUMREYJrsr"), "rDqf4n...Jrsr");
        assert_eq!(format_address("rShort"), "rShort");
    }

    #[test]
    fn test_generated_at_parsing_and_header() {
        let with_offset = parse_generated_at("2026-01-31T18:34:00Z").unwrap();
        let naive = parse_generated_at("2026-01-31T18:34:00.123456").unwrap();

        assert_eq!(header_timestamp(&with_offset), "Jan 31, 2026 at 6:34 PM");
        assert_eq!(header_timestamp(&naive), "Jan 31, 2026 at 6:34 PM");
        assert!(parse_generated_at("yesterday").is_none());
    }
}
