//! Typed reads from raw JSON records
//!
//! Field names come from configuration as dot-separated paths. Every reader
//! returns `None` for absent, null or malformed values so callers can fall
//! back to a default instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Follow a dot-separated `path` through objects (and arrays, by index).
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let mut current = record;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

/// Non-empty text. Numbers are rendered so numeric ids work.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Finite number from a JSON number or a numeric string.
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Calendar date from `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]` or RFC 3339.
/// Only the date part is kept; an RFC 3339 offset is not applied.
pub fn as_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(date_time.date());
    }
    DateTime::parse_from_rfc3339(text).ok().map(|date_time| date_time.date_naive())
}

/// A mapped field holds a value worth looking at (not null, not blank).
pub fn is_present(record: &Value, path: &str) -> bool {
    lookup(record, path).is_some_and(|value| match value {
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    })
}

pub fn text_at(record: &Value, path: &str) -> Option<String> {
    lookup(record, path).and_then(as_text)
}

pub fn number_at(record: &Value, path: &str) -> Option<f64> {
    lookup(record, path).and_then(as_number)
}

pub fn date_at(record: &Value, path: &str) -> Option<NaiveDate> {
    lookup(record, path).and_then(as_date)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lookup_follows_nested_paths() {
        let record = json!({"client": {"name": "Acme"}, "tags": [{"id": 4}], "gone": null});

        assert_eq!(text_at(&record, "client.name").as_deref(), Some("Acme"));
        assert_eq!(text_at(&record, "tags.0.id").as_deref(), Some("4"));
        assert!(lookup(&record, "client.missing").is_none());
        assert!(lookup(&record, "gone").is_none());
        assert!(lookup(&record, "").is_none());
    }

    #[test]
    fn numbers_accept_strings_and_reject_garbage() {
        assert_eq!(as_number(&json!(12.5)), Some(12.5));
        assert_eq!(as_number(&json!(" 40 ")), Some(40.0));
        assert_eq!(as_number(&json!("forty")), None);
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn dates_accept_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 11);

        assert_eq!(as_date(&json!("2025-03-11")), expected);
        assert_eq!(as_date(&json!("2025-03-11T00:00:00")), expected);
        assert_eq!(as_date(&json!("2025-03-11T09:30:00.123")), expected);
        assert_eq!(as_date(&json!("2025-03-11T23:30:00+01:00")), expected);
        assert_eq!(as_date(&json!("11/03/2025")), None);
        assert_eq!(as_date(&json!(20250311)), None);
    }

    #[test]
    fn blank_text_is_not_present() {
        let record = json!({"start": "  ", "end": "2025-01-01", "zero": 0});

        assert!(!is_present(&record, "start"));
        assert!(is_present(&record, "end"));
        assert!(is_present(&record, "zero"));
        assert!(!is_present(&record, "missing"));
        assert_eq!(text_at(&record, "start"), None);
    }
}
