//! Human-readable rendering of derived incident values.

use crate::parsing::parse_timestamp;

/// Placeholder shown for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a duration in minutes as `"{n}m"` or `"{h}h {m}m"`.
///
/// Absent and negative durations render as `"N/A"`.
#[must_use]
pub fn format_duration(minutes: Option<i64>) -> String {
    match minutes {
        Some(m @ 0..60) => format!("{m}m"),
        Some(m @ 60..) => format!("{}h {}m", m / 60, m % 60),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Formats a source timestamp as e.g. `"May 03, 2025 14:30"`.
///
/// Returns `"N/A"` when absent and `"Invalid date"` when unparseable.
#[must_use]
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    let Some(timestamp) = timestamp else {
        return NOT_AVAILABLE.to_string();
    };
    parse_timestamp(timestamp).map_or_else(
        || "Invalid date".to_string(),
        |dt| dt.format("%b %d, %Y %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_short_durations_in_minutes() {
        assert_eq!(format_duration(Some(0)), "0m");
        assert_eq!(format_duration(Some(59)), "59m");
    }

    #[test]
    fn formats_long_durations_in_hours() {
        assert_eq!(format_duration(Some(60)), "1h 0m");
        assert_eq!(format_duration(Some(135)), "2h 15m");
    }

    #[test]
    fn absent_or_negative_duration_is_not_available() {
        assert_eq!(format_duration(None), "N/A");
        assert_eq!(format_duration(Some(-3)), "N/A");
    }

    #[test]
    fn formats_timestamps() {
        assert_eq!(
            format_timestamp(Some("2025-05-03T14:30:00.000")),
            "May 03, 2025 14:30"
        );
        assert_eq!(format_timestamp(None), "N/A");
        assert_eq!(format_timestamp(Some("yesterday")), "Invalid date");
    }
}
