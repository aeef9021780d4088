//! ISO-8601 date string helpers

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static DATE_ISO8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d\d-\d\dT\d\d:\d\d:\d\d(\.\d+)?(([+-]\d\d:\d\d)|Z)?$")
        .expect("ISO-8601 pattern is valid")
});

/// Check whether a string looks like an ISO-8601 date-time
pub fn is_date_string(value: &str) -> bool {
    DATE_ISO8601.is_match(value)
}

/// Parse an ISO-8601 date-time string into UTC.
///
/// Strings without an offset are read as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if !is_date_string(value) {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a timestamp the way serialized payloads carry it
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalize every date-time string in a JSON tree to UTC millisecond form.
///
/// Strings that match the pattern but are not real dates are left as they are.
pub fn parse_object_dates(value: &mut Value) {
    match value {
        Value::String(s) => {
            if let Some(dt) = parse_date(s) {
                *s = format_date(&dt);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(parse_object_dates),
        Value::Object(map) => map.values_mut().for_each(parse_object_dates),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
