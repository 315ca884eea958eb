//! Human-readable formatting for entry subtitles.

use chrono::{DateTime, TimeZone};
use std::fmt;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Formats a byte count as `B`, `KB`, `MB` or `GB` with one decimal above bytes.
pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// Renders `then` relative to `now`.
///
/// Under a minute (including timestamps in the future) is "just now"; minutes, hours and days
/// are counted up to a week, after which the month and day are shown without the year.
pub fn format_relative_time<Tz>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let elapsed = now.clone().signed_duration_since(then);

    if elapsed.num_minutes() < 1 {
        "just now".to_owned()
    } else if elapsed.num_hours() < 1 {
        ago(elapsed.num_minutes(), "minute")
    } else if elapsed.num_days() < 1 {
        ago(elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 7 {
        ago(elapsed.num_days(), "day")
    } else {
        then.format("%B %-d").to_string()
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(2_621_440), "2.5 MB");
        assert_eq!(format_size(3 * GB), "3.0 GB");
    }

    #[test]
    fn test_relative_time_thresholds() {
        let then = at(1_000_000);

        assert_eq!(format_relative_time(&then, &at(1_000_059)), "just now");
        assert_eq!(format_relative_time(&then, &at(1_000_060)), "1 minute ago");
        assert_eq!(format_relative_time(&then, &at(1_000_000 + 59 * 60)), "59 minutes ago");
        assert_eq!(format_relative_time(&then, &at(1_000_000 + 3600)), "1 hour ago");
        assert_eq!(format_relative_time(&then, &at(1_000_000 + 23 * 3600)), "23 hours ago");
        assert_eq!(format_relative_time(&then, &at(1_000_000 + 86_400)), "1 day ago");
        assert_eq!(format_relative_time(&then, &at(1_000_000 + 6 * 86_400)), "6 days ago");
        // 1970-01-19T13:46:40Z
        assert_eq!(format_relative_time(&then, &at(1_000_000 + 7 * 86_400)), "January 12");
    }

    #[test]
    fn test_relative_time_future_is_just_now() {
        assert_eq!(format_relative_time(&at(2_000), &at(1_000)), "just now");
    }

    #[test]
    fn test_relative_time_falls_back_to_month_day() {
        // 2024-03-05T12:00:00Z
        let then = at(1_709_640_000);
        let now = at(1_709_640_000 + 30 * 86_400);
        assert_eq!(format_relative_time(&then, &now), "March 5");
    }
}
