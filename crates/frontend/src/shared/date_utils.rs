//! Timestamp formatting for tables and detail panels.
//!
//! The API sends RFC 3339 strings (`2024-03-15T14:02:26.123Z`) or bare
//! dates. Anything unparseable is shown as received.

use chrono::{DateTime, NaiveDate};

/// "2024-03-15T14:02:26.123Z" -> "15 Mar 2024, 14:02"
pub fn format_datetime(value: &str) -> String {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }
    format_date(value)
}

/// "2024-03-15" or "2024-03-15T14:02:26Z" -> "15 Mar 2024"
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%d %b %Y").to_string();
    }
    let date_part = value.split('T').next().unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d %b %Y").to_string(),
        Err(_) => value.to_string(),
    }
}

/// Optional timestamp cell; absent values render as a dash.
pub fn format_optional_date(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(v) => format_date(v),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15 Mar 2024, 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59+05:30"), "31 Dec 2024, 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15 Mar 2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15 Mar 2024");
        // no offset, still a date
        assert_eq!(format_date("2024-03-15T14:02:26"), "15 Mar 2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("31/12/2024"), "31/12/2024");
        assert_eq!(format_optional_date(None), "—");
        assert_eq!(format_optional_date(Some("  ")), "—");
    }
}
