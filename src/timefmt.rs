//! Timestamp parsing and formatting utilities
//!
//! The event log and every output file name share one fixed timestamp
//! format, `YYYY-MM-DD_HH-MM-SS`.

use chrono::NaiveDateTime;

/// Timestamp format shared by the event log and media file names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Parse a timestamp in the fixed format. Surrounding whitespace is ignored.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
}

/// Format a timestamp in the fixed format.
pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Derive the `.mp4` file name for a segment or clip ending at `value`.
pub fn media_filename(value: NaiveDateTime) -> String {
    format!("{}.mp4", format_timestamp(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 30)
            .unwrap()
    }

    #[test]
    fn test_timestamp_round_trip() {
        let value = sample();
        assert_eq!(parse_timestamp(&format_timestamp(value)).unwrap(), value);
    }

    #[test]
    fn test_parse_fixed_format() {
        let parsed = parse_timestamp("2024-01-01_10-00-05").unwrap();
        assert_eq!(format_timestamp(parsed), "2024-01-01_10-00-05");
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        assert_eq!(parse_timestamp("  2024-01-01_10-00-30\n").unwrap(), sample());
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse_timestamp("2024-01-01 10:00:05").is_err());
        assert!(parse_timestamp("not a date").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_media_filename() {
        assert_eq!(media_filename(sample()), "2024-01-01_10-00-30.mp4");
    }
}
