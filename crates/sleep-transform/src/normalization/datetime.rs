//! Diary date and clock-time parsing.
//!
//! Diary dates are written without a year (`"Jan 5"`). The year is taken
//! from the reference date, stepping back one year when that would place
//! the entry in the future.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde_json::Value;
use sleep_model::value_kind;

use crate::error::TimeParseError;

/// Format of a diary date once a year has been appended.
const DIARY_DATE_FORMAT: &str = "%b %d %Y";

/// Parse a year-less diary date relative to `today`.
///
/// Returns `None` for empty or unparseable text.
pub fn parse_diary_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let date = parse_with_year(text, today.year())?;
    if date > today {
        parse_with_year(text, today.year() - 1)
    } else {
        Some(date)
    }
}

fn parse_with_year(text: &str, year: i32) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{text} {year}"), DIARY_DATE_FORMAT).ok()
}

/// True for the literal text `null` in any casing.
pub fn is_null_text(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("null")
}

/// Parse a 24-hour `H:MM` / `HH:MM` clock time. Seconds are always zero.
///
/// Null, empty text and the literal `"null"` are absent values, not errors.
pub fn parse_clock_time(value: &Value) -> Result<Option<NaiveTime>, TimeParseError> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::String(text) => text.trim(),
        other => return Err(TimeParseError::NotText(value_kind(other))),
    };
    if text.is_empty() || is_null_text(text) {
        return Ok(None);
    }

    let (hours, minutes) = text.split_once(':').ok_or(TimeParseError::Format)?;
    let hours = parse_component(hours)?;
    let minutes = parse_component(minutes)?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
        .map(Some)
        .ok_or(TimeParseError::OutOfRange)
}

fn parse_component(part: &str) -> Result<u32, TimeParseError> {
    if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(TimeParseError::Format);
    }
    part.parse::<u32>().map_err(|_| TimeParseError::Format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn past_date_keeps_current_year() {
        assert_eq!(
            parse_diary_date("Jan 1", date(2025, 1, 15)),
            Some(date(2025, 1, 1))
        );
    }

    #[test]
    fn future_date_rolls_back_a_year() {
        assert_eq!(
            parse_diary_date("Dec 31", date(2025, 1, 15)),
            Some(date(2024, 12, 31))
        );
    }

    #[test]
    fn today_is_not_in_the_future() {
        assert_eq!(
            parse_diary_date("Jan 15", date(2025, 1, 15)),
            Some(date(2025, 1, 15))
        );
    }

    #[test]
    fn unparseable_dates_are_none() {
        let today = date(2025, 6, 1);
        assert_eq!(parse_diary_date("", today), None);
        assert_eq!(parse_diary_date("yesterday", today), None);
        assert_eq!(parse_diary_date("Foo 12", today), None);
        // 2025 is not a leap year.
        assert_eq!(parse_diary_date("Feb 29", today), None);
    }

    #[test]
    fn clock_times_parse_without_seconds() {
        assert_eq!(
            parse_clock_time(&json!("7:5")),
            Ok(NaiveTime::from_hms_opt(7, 5, 0))
        );
        assert_eq!(
            parse_clock_time(&json!("23:45")),
            Ok(NaiveTime::from_hms_opt(23, 45, 0))
        );
    }

    #[test]
    fn absent_clock_times_are_none() {
        assert_eq!(parse_clock_time(&json!("null")), Ok(None));
        assert_eq!(parse_clock_time(&json!("NULL")), Ok(None));
        assert_eq!(parse_clock_time(&json!("")), Ok(None));
        assert_eq!(parse_clock_time(&Value::Null), Ok(None));
    }

    #[test]
    fn malformed_clock_times_are_errors() {
        assert_eq!(parse_clock_time(&json!("7")), Err(TimeParseError::Format));
        assert_eq!(parse_clock_time(&json!("7:5:00")), Err(TimeParseError::Format));
        assert_eq!(parse_clock_time(&json!("ab:cd")), Err(TimeParseError::Format));
        assert_eq!(parse_clock_time(&json!("25:00")), Err(TimeParseError::OutOfRange));
        assert_eq!(parse_clock_time(&json!(730)), Err(TimeParseError::NotText("number")));
    }
}
