//! Type inference for raw text tokens
//!
//! Classification is ordered and the first match wins:
//!
//! 1. number - parses as a finite `f64`
//! 2. boolean - `true` / `false`, case-insensitive
//! 3. date - contains a `YYYY-MM-DD` run and parses as a calendar date
//! 4. string - anything else, kept verbatim
//!
//! Numbers are tried first, so `"20240115"` is the number 20240115 rather
//! than a date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_regex::regex_is_match;

use crate::cell::CellValue;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Infer a typed value from a token the caller has already trimmed.
///
/// An empty token is [`CellValue::Empty`].
pub fn infer_value(token: &str) -> CellValue {
    if token.is_empty() {
        return CellValue::Empty;
    }

    if let Some(n) = parse_number(token) {
        return CellValue::Number(n);
    }

    if token.eq_ignore_ascii_case("true") {
        return CellValue::Boolean(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return CellValue::Boolean(false);
    }

    if let Some(date) = parse_date(token) {
        return CellValue::Date(date);
    }

    CellValue::String(token.to_string())
}

/// Parse a finite number; `NaN` and infinities are rejected
pub fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a token containing an ISO calendar date.
///
/// Offsets in RFC 3339 timestamps are normalized to UTC.
pub fn parse_date(token: &str) -> Option<NaiveDateTime> {
    if !regex_is_match!(r"\d{4}-\d{2}-\d{2}", token) {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, format) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(token)
        .ok()
        .map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellType;

    fn ty(token: &str) -> CellType {
        infer_value(token).cell_type()
    }

    #[test]
    fn test_inference_order() {
        assert_eq!(ty("42"), CellType::Number);
        assert_eq!(ty("true"), CellType::Boolean);
        assert_eq!(ty("2024-01-15"), CellType::Date);
        assert_eq!(ty("hello"), CellType::String);
    }

    #[test]
    fn test_compact_date_is_a_number() {
        assert_eq!(infer_value("20240115"), CellValue::Number(20240115.0));
        assert_eq!(infer_value("2024"), CellValue::Number(2024.0));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(infer_value("-3.5"), CellValue::Number(-3.5));
        assert_eq!(infer_value("1e3"), CellValue::Number(1000.0));
        assert_eq!(infer_value("0"), CellValue::Number(0.0));
    }

    #[test]
    fn test_non_finite_is_not_a_number() {
        assert_eq!(ty("NaN"), CellType::String);
        assert_eq!(ty("inf"), CellType::String);
        assert_eq!(ty("-infinity"), CellType::String);
    }

    #[test]
    fn test_booleans_case_insensitive() {
        assert_eq!(infer_value("TRUE"), CellValue::Boolean(true));
        assert_eq!(infer_value("False"), CellValue::Boolean(false));
        assert_eq!(ty("yes"), CellType::String);
    }

    #[test]
    fn test_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(infer_value("2024-01-15T10:30:00"), CellValue::Date(expected));
        assert_eq!(infer_value("2024-01-15 10:30"), CellValue::Date(expected));
        assert_eq!(
            infer_value("2024-01-15T12:30:00+02:00"),
            CellValue::Date(expected)
        );
    }

    #[test]
    fn test_invalid_calendar_date_is_string() {
        assert_eq!(ty("2024-13-45"), CellType::String);
        assert_eq!(ty("due 2024-01-15 or later"), CellType::String);
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(infer_value(""), CellValue::Empty);
    }
}
