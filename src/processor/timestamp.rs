//! Lenient timestamp parsing for the alarm and containment columns.
//!
//! Perimeter exports spell timestamps several ways depending on the tool
//! that produced them. Every accepted spelling is converted to milliseconds
//! since the Unix epoch in UTC; naive values are taken to be UTC already.
//! Anything unrecognised parses to `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Spellings that carry an explicit UTC offset
const OFFSET_FORMATS: &[&str] = &["%Y/%m/%d %H:%M:%S%#z", "%Y-%m-%d %H:%M:%S%#z"];

/// Date-time spellings without an offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only spellings, taken as midnight UTC
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a timestamp string to UTC epoch milliseconds.
///
/// # Examples
///
/// ```
/// use fire_analyst::processor::timestamp::parse_timestamp_millis;
///
/// assert_eq!(parse_timestamp_millis("1970/01/01 00:00:01+00"), Some(1_000));
/// assert_eq!(parse_timestamp_millis("1970-01-02"), Some(86_400_000));
/// assert_eq!(parse_timestamp_millis("not a date"), None);
/// ```
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp_millis());
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.timestamp_millis());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc().timestamp_millis());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return parsed
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc().timestamp_millis());
        }
    }

    None
}

/// Calendar month (1-12) of a UTC epoch-millisecond timestamp
pub fn month_of(millis: i64) -> Option<i32> {
    use chrono::Datelike;
    DateTime::from_timestamp_millis(millis).map(|dt| dt.month() as i32)
}

/// Milliseconds to fractional hours
pub fn millis_to_hours(millis: i64) -> f64 {
    millis as f64 / 3_600_000.0
}
