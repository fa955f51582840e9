//! Closed-form arithmetic for the Saturday/Sunday weekend model.

use jiff::Span;
use jiff::civil::Date;

use super::{CalendarError, Result, WorkCalendar, days_between, is_working_day};

/// Working days per full week.
const WORKING_DAYS_PER_WEEK: i64 = 5;

/// Monday through Friday are worked; Saturday and Sunday are not.
///
/// Counting and adding run in constant time regardless of the span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Weekends;

impl WorkCalendar for Weekends {
    fn is_working_day(&self, date: Date) -> bool {
        is_working_day(date)
    }

    fn count_working_days_inclusive(&self, start: Date, end: Date) -> i64 {
        if start > end {
            return 0;
        }
        let days = days_between(start, end) + 1;
        let first = monday_offset(start);
        let partial: i64 = (0..days % 7)
            .map(|i| i64::from((first + i) % 7 < WORKING_DAYS_PER_WEEK))
            .sum();
        days / 7 * WORKING_DAYS_PER_WEEK + partial
    }

    fn add_working_days_to_date(&self, start: Date, n: i64) -> Result<Date> {
        if n == 0 {
            return Ok(start);
        }
        if n > 0 {
            let first = next_working_day(start)?;
            let extra = n - 1;
            let rest = extra % WORKING_DAYS_PER_WEEK;
            let crosses_weekend = monday_offset(first) + rest >= WORKING_DAYS_PER_WEEK;
            let days = calendar_days(n, extra, crosses_weekend)?;
            Ok(first.checked_add(Span::new().try_days(days)?)?)
        } else {
            let last = previous_working_day(start)?;
            // -(n + 1) cannot overflow, unlike -n.
            let extra = -(n + 1);
            let rest = extra % WORKING_DAYS_PER_WEEK;
            let crosses_weekend = monday_offset(last) < rest;
            let days = calendar_days(n, extra, crosses_weekend)?;
            Ok(last.checked_sub(Span::new().try_days(days)?)?)
        }
    }
}

/// Calendar days spanned by `extra` working days past the first one.
fn calendar_days(n: i64, extra: i64, crosses_weekend: bool) -> Result<i64> {
    let weekend = if crosses_weekend { 2 } else { 0 };
    (extra / WORKING_DAYS_PER_WEEK)
        .checked_mul(7)
        .and_then(|d| d.checked_add(extra % WORKING_DAYS_PER_WEEK + weekend))
        .ok_or(CalendarError::Overflow(n))
}

/// Monday is 0, Sunday is 6.
fn monday_offset(date: Date) -> i64 {
    i64::from(date.weekday().to_monday_zero_offset())
}

/// `date` itself if it is worked, otherwise the following Monday.
fn next_working_day(date: Date) -> Result<Date> {
    let skip = match monday_offset(date) {
        5 => 2,
        6 => 1,
        _ => 0,
    };
    Ok(date.checked_add(Span::new().try_days(skip)?)?)
}

/// `date` itself if it is worked, otherwise the preceding Friday.
fn previous_working_day(date: Date) -> Result<Date> {
    let skip = match monday_offset(date) {
        5 => 1,
        6 => 2,
        _ => 0,
    };
    Ok(date.checked_sub(Span::new().try_days(skip)?)?)
}
