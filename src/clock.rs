use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Format of a date-time-local input value.
pub const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
const WIRE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Wall-clock "now" in `tz`, truncated to the minute like a date-time-local input.
pub fn local_now(tz: Tz) -> NaiveDateTime {
    let now = Utc::now().with_timezone(&tz).naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

pub fn parse_local(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

pub fn format_local(value: &NaiveDateTime) -> String {
    value.format(LOCAL_FORMAT).to_string()
}

/// `"2030-01-01 09:00:00"` -> `"2030-01-01T09:00"`. Unknown shapes keep their text with `T` joined.
pub fn wire_to_local(value: &str) -> String {
    let value = value.trim();
    WIRE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.naive_local()))
        .map(|parsed| format_local(&parsed))
        .unwrap_or_else(|| value.replacen(' ', "T", 1))
}

/// `"2024-05-01T10:00"` -> `"2024-05-01 10:00"`.
pub fn local_to_wire(value: &str) -> String {
    value.replacen('T', " ", 1)
}
