//! Weekends plus an explicit set of days off.

use std::collections::BTreeSet;

use jiff::civil::Date;

use super::{Result, WorkCalendar, Weekends, is_working_day};

/// The weekend model with additional non-working dates layered on top.
///
/// The dates typically come from a public-holiday source or from personal
/// off-day ranges (vacation, sickness, trips). Dates that already fall on a
/// weekend are accepted and have no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    days_off: BTreeSet<Date>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a single date as non-working. Returns `false` if it already was.
    pub fn insert(&mut self, date: Date) -> bool {
        self.days_off.insert(date)
    }

    /// Marks every date in `[first, last]` as non-working.
    pub fn insert_range(&mut self, first: Date, last: Date) -> Result<()> {
        let mut day = first;
        while day <= last {
            self.days_off.insert(day);
            if day == last {
                break;
            }
            day = day.tomorrow()?;
        }
        Ok(())
    }

    pub fn contains(&self, date: Date) -> bool {
        self.days_off.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.days_off.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days_off.is_empty()
    }
}

impl FromIterator<Date> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self {
            days_off: iter.into_iter().collect(),
        }
    }
}

impl Extend<Date> for HolidayCalendar {
    fn extend<I: IntoIterator<Item = Date>>(&mut self, iter: I) {
        self.days_off.extend(iter);
    }
}

impl WorkCalendar for HolidayCalendar {
    fn is_working_day(&self, date: Date) -> bool {
        is_working_day(date) && !self.days_off.contains(&date)
    }

    fn count_working_days_inclusive(&self, start: Date, end: Date) -> i64 {
        if start > end {
            return 0;
        }
        let weekdays = Weekends.count_working_days_inclusive(start, end);
        let off: i64 = self
            .days_off
            .range(start..=end)
            .map(|&d| i64::from(is_working_day(d)))
            .sum();
        weekdays - off
    }
}
