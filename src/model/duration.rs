//! Duration math shared by rows, the running total, and song labels

/// Maximum minutes accepted from the minutes steppers
pub const MAX_MINUTES: u32 = 9999;

/// Clamp a user-entered minutes value to the accepted range
pub fn clamp_minutes(minutes: u32) -> u32 {
    minutes.min(MAX_MINUTES)
}

/// Convert user-entered minutes to seconds
pub fn minutes_to_seconds(minutes: u32) -> u32 {
    clamp_minutes(minutes) * 60
}

/// Format a duration as "m:ss"
///
/// Minutes are not zero-padded and do not roll over into hours;
/// a 90-minute set renders as "90:00".
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(60), "1:00");
        assert_eq!(format_duration(125), "2:05");
        assert_eq!(format_duration(3661), "61:01");
    }

    #[test]
    fn test_minutes_to_seconds() {
        assert_eq!(minutes_to_seconds(0), 0);
        assert_eq!(minutes_to_seconds(5), 300);
        assert_eq!(minutes_to_seconds(MAX_MINUTES + 100), MAX_MINUTES * 60);
    }

    #[test]
    fn test_clamp_minutes() {
        assert_eq!(clamp_minutes(0), 0);
        assert_eq!(clamp_minutes(42), 42);
        assert_eq!(clamp_minutes(1_000_000), MAX_MINUTES);
    }
}
