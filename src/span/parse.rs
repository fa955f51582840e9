//! Parser for the duration grammar.
//!
//! ```text
//! duration := ["-"] token (ws token)*  |  ["-"] iso8601
//! token    := number unit
//! number   := digits ["." digits]
//! unit     := "w" | "d" | "h" | "m" | "s" | "ms"
//! ```
//!
//! Units descend from weeks to milliseconds, each at most once.

use jiff::SignedDuration;

use super::{TimeSpan, Unit, UnitConvention, WorkWeek};

/// Errors that can occur while parsing a duration.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty duration")]
    Empty,

    #[error("missing number before unit in '{0}'")]
    MissingNumber(String),

    #[error("invalid number in '{0}'")]
    InvalidNumber(String),

    #[error("unknown unit in '{0}' (expected w, d, h, m, s or ms)")]
    UnknownUnit(String),

    #[error("'{0}' is out of order: units go from weeks down to milliseconds, each once")]
    OutOfOrder(String),

    #[error("duration out of range")]
    Overflow,

    #[error("invalid ISO 8601 duration: {0}")]
    Iso(#[from] jiff::Error),
}

/// Parses an effort string with work-relative days and weeks.
///
/// With the default 7.5-hour day and 37.5-hour week, `"1d 2h"` is 9h 30m.
pub fn parse_time_span(text: &str, week: &WorkWeek) -> Result<TimeSpan, ParseError> {
    parse(text, UnitConvention::Work(*week))
}

pub(super) fn parse(text: &str, convention: UnitConvention) -> Result<TimeSpan, ParseError> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    if body.is_empty() {
        return Err(ParseError::Empty);
    }

    let span = if body.starts_with(['P', 'p']) {
        TimeSpan::from_duration(body.parse::<SignedDuration>()?)
    } else {
        parse_tokens(body, convention)?
    };

    Ok(if negative { -span } else { span })
}

fn parse_tokens(body: &str, convention: UnitConvention) -> Result<TimeSpan, ParseError> {
    let mut total: i64 = 0;
    let mut previous: Option<Unit> = None;

    for token in body.split_whitespace() {
        let lower = token.to_ascii_lowercase();
        let split = lower
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| ParseError::UnknownUnit(token.to_string()))?;
        let (number, symbol) = lower.split_at(split);

        if number.is_empty() {
            return Err(ParseError::MissingNumber(token.to_string()));
        }
        let unit =
            Unit::from_symbol(symbol).ok_or_else(|| ParseError::UnknownUnit(token.to_string()))?;
        if previous.is_some_and(|p| unit <= p) {
            return Err(ParseError::OutOfOrder(token.to_string()));
        }
        previous = Some(unit);

        let value = parse_number(number).ok_or_else(|| ParseError::InvalidNumber(token.to_string()))?;
        let millis = to_millis(value * convention.unit_millis(unit) as f64)?;
        total = total.checked_add(millis).ok_or(ParseError::Overflow)?;
    }

    Ok(TimeSpan::from_millis(total))
}

/// Digits with at most one decimal point. Rejects signs, exponents and `inf`.
fn parse_number(number: &str) -> Option<f64> {
    let well_formed = number.chars().all(|c| c.is_ascii_digit() || c == '.')
        && number.chars().filter(|&c| c == '.').count() <= 1
        && number.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return None;
    }
    number.parse().ok()
}

#[allow(clippy::cast_possible_truncation)] // Bounds are checked first.
fn to_millis(millis: f64) -> Result<i64, ParseError> {
    let millis = millis.round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return Err(ParseError::Overflow);
    }
    Ok(millis as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(text: &str) -> Result<TimeSpan, ParseError> {
        parse_time_span(text, &WorkWeek::default())
    }

    fn hm(hours: i64, minutes: i64) -> TimeSpan {
        TimeSpan::from_minutes(hours * 60 + minutes)
    }

    #[test]
    fn day_and_hours_use_the_work_day() {
        assert_eq!(work("1d 2h").unwrap(), hm(9, 30));
    }

    #[test]
    fn week_and_days_use_the_work_week() {
        assert_eq!(work("1w 2d").unwrap(), hm(52, 30));
    }

    #[test]
    fn every_unit() {
        let span = work("1w 1d 1h 1m 1s 1ms").unwrap();
        let expected = hm(37 + 7 + 1, 30 + 30 + 1) + TimeSpan::from_millis(1_001);
        assert_eq!(span, expected);
    }

    #[test]
    fn calendar_convention_uses_whole_days() {
        let span = TimeSpan::parse("1w 1d", UnitConvention::Calendar).unwrap();
        assert_eq!(span, TimeSpan::from_hours(8 * 24));
    }

    #[test]
    fn custom_work_week() {
        let week = WorkWeek {
            hours_per_day: 8.0,
            hours_per_week: 40.0,
        };
        assert_eq!(parse_time_span("2w 3d", &week).unwrap(), TimeSpan::from_hours(104));
    }

    #[test]
    fn leading_zeros_and_case_and_spacing() {
        assert_eq!(work("  4D   03h 46M ").unwrap(), hm(30 + 3, 46));
    }

    #[test]
    fn fractional_values() {
        assert_eq!(work("0.5d").unwrap(), hm(3, 45));
        assert_eq!(work("1.5h").unwrap(), hm(1, 30));
    }

    #[test]
    fn negative_span() {
        assert_eq!(work("-1d").unwrap(), hm(-7, -30));
        assert_eq!(work("- 2h 5m").unwrap(), hm(-2, -5));
    }

    #[test]
    fn iso_duration() {
        assert_eq!(work("PT80H").unwrap(), TimeSpan::from_hours(80));
        assert_eq!(work("-PT1H30M").unwrap(), hm(-1, -30));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(work(""), Err(ParseError::Empty)));
        assert!(matches!(work("   "), Err(ParseError::Empty)));
        assert!(matches!(work("-"), Err(ParseError::Empty)));
    }

    #[test]
    fn malformed_tokens() {
        assert!(matches!(work("d"), Err(ParseError::MissingNumber(_))));
        assert!(matches!(work("12"), Err(ParseError::UnknownUnit(_))));
        assert!(matches!(work("3y"), Err(ParseError::UnknownUnit(_))));
        assert!(matches!(work("1.2.3h"), Err(ParseError::InvalidNumber(_))));
        assert!(matches!(work("+3h"), Err(ParseError::InvalidNumber(_))));
        assert!(matches!(work("P1X"), Err(ParseError::Iso(_))));
    }

    #[test]
    fn units_must_descend() {
        assert!(matches!(work("2h 1d"), Err(ParseError::OutOfOrder(t)) if t == "1d"));
        assert!(matches!(work("1h 2h"), Err(ParseError::OutOfOrder(_))));
        assert!(matches!(work("1ms 1s"), Err(ParseError::OutOfOrder(_))));
    }

    #[test]
    fn overflow() {
        assert!(matches!(work("99999999999999999999w"), Err(ParseError::Overflow)));
    }
}
