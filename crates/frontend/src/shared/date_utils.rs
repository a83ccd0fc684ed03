/// Utilities for date and time formatting
///
/// Drafts are stamped with epoch milliseconds; the UI shows them as DD.MM.YYYY HH:MM:SS
use chrono::{Local, TimeZone};

const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Format epoch milliseconds in the browser's local time zone
pub fn format_timestamp_ms(timestamp_ms: i64) -> String {
    format_timestamp_ms_in(timestamp_ms, &Local)
}

/// Format epoch milliseconds in the given time zone
/// Example: 1700000000000 (UTC) -> "14.11.2023 22:13:20"
pub fn format_timestamp_ms_in<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).single() {
        Some(datetime) => datetime.format(DISPLAY_FORMAT).to_string(),
        None => timestamp_ms.to_string(),
    }
}
