//! Row-to-entity parsing helpers.
//!
//! Timestamps are written with [`format_timestamp`] (RFC 3339, microseconds,
//! `Z` suffix). The fixed width keeps `created_at >= ?` comparisons correct
//! as plain string comparisons in SQL.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;

use crate::error::DatabaseError;

/// Canonical storage form for a timestamp.
#[must_use]
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000000Z"`) and `SQLite`'s
/// default format (`"2026-02-09 14:30:00"`), the latter for rows written by
/// other tools.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Decode an optional JSON column into `T`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string is not valid JSON for `T`.
pub fn parse_optional_json<T: DeserializeOwned>(
    s: Option<&str>,
) -> Result<Option<T>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => serde_json::from_str(s)
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}"))),
        _ => Ok(None),
    }
}

/// Like [`parse_optional_json`], but a malformed value is logged and read as absent.
///
/// Derived outputs are written by an external engine; one bad column must not
/// hide the rest of the record.
pub fn parse_lenient_json<T: DeserializeOwned>(s: Option<&str>, column: &str) -> Option<T> {
    match parse_optional_json(s) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(column, error = %e, "ignoring malformed derived output");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ideate_core::enums::ProjectStatus;

    #[test]
    fn timestamps_are_fixed_width_and_ordered() {
        let a = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let b = a + chrono::Duration::microseconds(1);
        let (fa, fb) = (format_timestamp(a), format_timestamp(b));
        assert_eq!(fa, "2026-03-01T09:00:00.000000Z");
        assert_eq!(fa.len(), fb.len());
        assert!(fa < fb);
        assert_eq!(parse_datetime(&fa).unwrap(), a);
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn parses_status_enum() {
        let status: ProjectStatus = parse_enum("complete").unwrap();
        assert_eq!(status, ProjectStatus::Complete);
        assert!(parse_enum::<ProjectStatus>("done").is_err());
    }

    #[test]
    fn lenient_json_swallows_garbage() {
        let parsed: Option<Vec<String>> = parse_lenient_json(Some("not json"), "search_citations");
        assert!(parsed.is_none());
        let parsed: Option<Vec<String>> = parse_lenient_json(Some(r#"["a"]"#), "search_citations");
        assert_eq!(parsed, Some(vec!["a".to_string()]));
        let parsed: Option<Vec<String>> = parse_lenient_json(Some(""), "search_citations");
        assert!(parsed.is_none());
    }
}
