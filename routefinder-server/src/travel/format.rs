//! Human-readable travel durations.

/// Format a duration in seconds as `"{h}h {m}m"`, or `"{m}m"` under an hour.
///
/// Seconds are truncated to whole minutes. Non-finite or negative input
/// formats as `"N/A"`.
///
/// # Examples
///
/// ```
/// use routefinder_server::travel::format_duration;
///
/// assert_eq!(format_duration(45.0), "0m");
/// assert_eq!(format_duration(90.0), "1m");
/// assert_eq!(format_duration(3661.0), "1h 1m");
/// assert_eq!(format_duration(f64::INFINITY), "N/A");
/// ```
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "N/A".to_string();
    }

    let mins = (seconds / 60.0).floor() as u64;
    let hours = mins / 60;
    let remaining = mins % 60;

    if hours > 0 {
        format!("{}h {}m", hours, remaining)
    } else {
        format!("{}m", remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_a_minute() {
        assert_eq!(format_duration(0.0), "0m");
        assert_eq!(format_duration(59.0), "0m");
        assert_eq!(format_duration(59.99), "0m");
    }

    #[test]
    fn minutes_only() {
        assert_eq!(format_duration(90.0), "1m");
        assert_eq!(format_duration(3599.0), "59m");
    }

    #[test]
    fn hours_and_minutes() {
        assert_eq!(format_duration(3600.0), "1h 0m");
        assert_eq!(format_duration(3661.0), "1h 1m");
        assert_eq!(format_duration(7322.4), "2h 2m");
    }

    #[test]
    fn unknown() {
        assert_eq!(format_duration(f64::NAN), "N/A");
        assert_eq!(format_duration(-1.0), "N/A");
    }
}
