//! Timestamp parsing for CAD records.
//!
//! The dispatch dataset publishes "floating" timestamps: wall-clock local
//! time with no offset (e.g. `2025-05-03T14:30:00.000`). Every derived metric
//! is computed on that wall clock as-is. When a value does carry an offset,
//! its local wall-clock reading is kept rather than converted to another zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Formats tried in order for offset-less timestamps.
const FLOATING_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses an ISO 8601 timestamp into its wall-clock date and time.
///
/// Returns `None` for empty or malformed input.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in FLOATING_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike as _, Timelike as _};

    use super::*;

    #[test]
    fn parses_floating_with_fractional() {
        let dt = parse_timestamp("2024-01-15T14:30:00.000").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn parses_floating_without_fractional() {
        let dt = parse_timestamp("2024-01-15T14:30:00").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 14:30:00");
    }

    #[test]
    fn parses_space_separated() {
        let dt = parse_timestamp("2024-01-15 09:05:10").unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 5);
    }

    #[test]
    fn keeps_wall_clock_of_offset_timestamps() {
        let dt = parse_timestamp("2024-01-15T23:30:00-08:00").unwrap();
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.day(), 15);

        let utc = parse_timestamp("2024-01-15T23:30:00Z").unwrap();
        assert_eq!(utc.hour(), 23);
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 00:00:00");
    }

    #[test]
    fn rejects_invalid_timestamps() {
        assert!(parse_timestamp("not-a-date").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2024-13-45T00:00:00").is_none());
    }
}
