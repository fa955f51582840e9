//! Working-day calendar arithmetic.
//!
//! Everything here operates on civil (wall-clock) dates and times. There is no
//! time zone involved, so a daylight-saving transition never changes a day count.
//!
//! [`WorkCalendar`] is the seam for non-working days. Implementors answer one
//! question, [`WorkCalendar::is_working_day`], and inherit day-stepping versions
//! of every other operation. [`Weekends`] overrides them with closed forms.

mod holidays;
mod weekends;

use jiff::Span;
use jiff::civil::{Date, DateTime, Time, Weekday};

pub use holidays::HolidayCalendar;
pub use weekends::Weekends;

/// Errors that can occur during calendar arithmetic.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("date arithmetic out of range: {0}")]
    OutOfRange(#[from] jiff::Error),

    #[error("{0} working days overflows the day count")]
    Overflow(i64),
}

pub type Result<T> = core::result::Result<T, CalendarError>;

/// A calendar that knows which days are worked.
///
/// The provided methods step one day at a time and are correct for any
/// predicate. They double as the reference oracle for faster overrides.
pub trait WorkCalendar {
    /// Whether work happens on `date`.
    fn is_working_day(&self, date: Date) -> bool;

    /// Counts the working days in the closed interval `[start, end]`.
    ///
    /// Returns 0 when `start` is after `end`.
    fn count_working_days_inclusive(&self, start: Date, end: Date) -> i64 {
        let mut count = 0;
        let mut day = start;
        while day <= end {
            if self.is_working_day(day) {
                count += 1;
            }
            match day.tomorrow() {
                Ok(next) => day = next,
                Err(_) => break,
            }
        }
        count
    }

    /// Returns the date `n` working days after `start`.
    ///
    /// `start` counts as the first working day if it is one, so adding 1 to a
    /// Monday yields that Monday and adding 1 to a Saturday yields the Monday
    /// after. `n == 0` returns `start`. A negative `n` walks backwards the same
    /// way, landing on the latest date `d` with
    /// `count_working_days_inclusive(d, start) == -n`.
    fn add_working_days_to_date(&self, start: Date, n: i64) -> Result<Date> {
        if n == 0 {
            return Ok(start);
        }
        let target = n.unsigned_abs();
        let mut day = start;
        let mut counted = u64::from(self.is_working_day(day));
        while counted < target {
            day = if n > 0 {
                day.tomorrow()?
            } else {
                day.yesterday()?
            };
            if self.is_working_day(day) {
                counted += 1;
            }
        }
        Ok(day)
    }

    /// Returns the timestamp `n` working days after `start`, keeping its time of day.
    fn add_working_days(&self, start: DateTime, n: i64) -> Result<DateTime> {
        let date = self.add_working_days_to_date(start.date(), n)?;
        tracing::trace!(%start, n, %date, "added working days");
        Ok(date.to_datetime(start.time()))
    }
}

impl<C: WorkCalendar + ?Sized> WorkCalendar for &C {
    fn is_working_day(&self, date: Date) -> bool {
        (**self).is_working_day(date)
    }

    fn count_working_days_inclusive(&self, start: Date, end: Date) -> i64 {
        (**self).count_working_days_inclusive(start, end)
    }

    fn add_working_days_to_date(&self, start: Date, n: i64) -> Result<Date> {
        (**self).add_working_days_to_date(start, n)
    }
}

/// Monday through Friday.
pub fn is_working_day(date: Date) -> bool {
    !matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// [`WorkCalendar::add_working_days`] on the Saturday/Sunday weekend model.
pub fn add_working_days(start: DateTime, n: i64) -> Result<DateTime> {
    Weekends.add_working_days(start, n)
}

/// [`WorkCalendar::count_working_days_inclusive`] on the Saturday/Sunday weekend model.
pub fn count_working_days_inclusive(start: Date, end: Date) -> i64 {
    Weekends.count_working_days_inclusive(start, end)
}

/// Whole 24-hour days from `start` to `end`, truncated toward zero.
pub fn count_calendar_days(start: DateTime, end: DateTime) -> i64 {
    start.duration_until(end).as_hours() / 24
}

/// Plain calendar-day addition, no weekend awareness.
pub fn add_calendar_days(t: DateTime, n: i64) -> Result<DateTime> {
    Ok(t.checked_add(Span::new().try_days(n)?)?)
}

/// Midnight of the same date.
pub fn truncate_to_day(t: DateTime) -> DateTime {
    t.date().to_datetime(Time::midnight())
}

/// The Monday of the week holding `date`.
pub fn week_monday(date: Date) -> Result<Date> {
    let offset = i64::from(date.weekday().to_monday_zero_offset());
    Ok(date.checked_sub(Span::new().try_days(offset)?)?)
}

/// The Sunday of the week holding `date`.
pub fn week_sunday(date: Date) -> Result<Date> {
    let offset = 6 - i64::from(date.weekday().to_monday_zero_offset());
    Ok(date.checked_add(Span::new().try_days(offset)?)?)
}

/// Calendar days from `start` to `end`; negative when `end` comes first.
pub(crate) fn days_between(start: Date, end: Date) -> i64 {
    start.duration_until(end).as_hours() / 24
}
