//! Signed time spans and the compact duration grammar ("1w 2d", "4d 03h 46m").
//!
//! A [`TimeSpan`] is an exact, signed length of time. What "a day" or "a week"
//! means when such a span is written down depends on the [`UnitConvention`]:
//! calendar days are 24 hours, work days are [`WorkWeek::hours_per_day`].
//! The convention is always passed explicitly, and [`Estimate`] carries it
//! alongside the span so a stored value says how it should be read back.

mod format;
mod parse;

use std::fmt;
use std::ops::{Add, Neg, Sub};

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

pub use format::{DurationStyle, Layout, format_duration, format_work_duration};
pub use parse::{ParseError, parse_time_span};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// A signed length of time with millisecond precision.
///
/// Negative spans are meaningful: a negative man delay means ahead of plan.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeSpan(SignedDuration);

impl TimeSpan {
    pub const ZERO: Self = Self(SignedDuration::ZERO);

    pub fn from_duration(duration: SignedDuration) -> Self {
        Self(duration)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(SignedDuration::from_millis(millis))
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self(SignedDuration::from_mins(minutes))
    }

    pub fn from_hours(hours: i64) -> Self {
        Self(SignedDuration::from_hours(hours))
    }

    /// `None` when `millis` does not fit the representable range.
    pub(crate) fn from_millis_i128(millis: i128) -> Option<Self> {
        i64::try_from(millis).ok().map(Self::from_millis)
    }

    pub fn as_duration(self) -> SignedDuration {
        self.0
    }

    /// Total milliseconds, truncating anything finer.
    pub fn as_millis(self) -> i128 {
        self.0.as_millis()
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// `self / other`, or `None` when `other` is zero.
    pub fn ratio(self, other: Self) -> Option<f64> {
        if other.is_zero() {
            return None;
        }
        Some(self.as_secs_f64() / other.as_secs_f64())
    }

    /// Parses the duration grammar under the given convention.
    pub fn parse(text: &str, convention: UnitConvention) -> Result<Self, ParseError> {
        parse::parse(text, convention)
    }

    /// Renders the span under the given convention.
    pub fn format(self, convention: UnitConvention, style: &DurationStyle) -> String {
        format::render(self, convention, style)
    }
}

impl Add for TimeSpan {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeSpan {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for TimeSpan {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<SignedDuration> for TimeSpan {
    fn from(duration: SignedDuration) -> Self {
        Self(duration)
    }
}

/// A unit of the duration grammar, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Unit {
    pub const ALL: [Self; 6] = [
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Millisecond,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Week => "w",
            Self::Day => "d",
            Self::Hour => "h",
            Self::Minute => "m",
            Self::Second => "s",
            Self::Millisecond => "ms",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.symbol() == symbol)
    }
}

/// Working hours per day and per week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkWeek {
    pub hours_per_day: f64,
    pub hours_per_week: f64,
}

impl Default for WorkWeek {
    fn default() -> Self {
        Self {
            hours_per_day: 7.5,
            hours_per_week: 37.5,
        }
    }
}

impl WorkWeek {
    /// Length of one working day.
    pub fn workday(&self) -> TimeSpan {
        TimeSpan::from_millis(hours_to_millis(self.hours_per_day))
    }

    /// `days` whole working days as a span.
    pub fn workdays(&self, days: i64) -> TimeSpan {
        TimeSpan::from_millis(days.saturating_mul(hours_to_millis(self.hours_per_day)))
    }
}

/// How days and weeks translate to hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum UnitConvention {
    /// 24-hour days, 7-day weeks.
    Calendar,
    /// Days and weeks of working hours.
    Work(WorkWeek),
}

impl UnitConvention {
    /// Milliseconds in one `unit`. Never less than one.
    pub fn unit_millis(&self, unit: Unit) -> i64 {
        let millis = match (self, unit) {
            (Self::Calendar, Unit::Week) => 7 * MILLIS_PER_DAY,
            (Self::Calendar, Unit::Day) => MILLIS_PER_DAY,
            (Self::Work(week), Unit::Week) => hours_to_millis(week.hours_per_week),
            (Self::Work(week), Unit::Day) => hours_to_millis(week.hours_per_day),
            (_, Unit::Hour) => MILLIS_PER_HOUR,
            (_, Unit::Minute) => MILLIS_PER_MINUTE,
            (_, Unit::Second) => MILLIS_PER_SECOND,
            (_, Unit::Millisecond) => 1,
        };
        millis.max(1)
    }

    /// The style a value under this convention is normally shown in.
    pub fn default_style(&self) -> DurationStyle {
        match self {
            Self::Calendar => DurationStyle::calendar(),
            Self::Work(_) => DurationStyle::work(),
        }
    }
}

impl Default for UnitConvention {
    fn default() -> Self {
        Self::Work(WorkWeek::default())
    }
}

#[allow(clippy::cast_possible_truncation)] // Configured hours are validated to a small positive range.
fn hours_to_millis(hours: f64) -> i64 {
    (hours * MILLIS_PER_HOUR as f64).round() as i64
}

/// A span together with the convention it is written in.
///
/// Effort fields (worked, remaining, estimates) round-trip through this type
/// so that "1d" is never ambiguous between 24 and 7.5 hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub span: TimeSpan,
    pub convention: UnitConvention,
}

impl Estimate {
    pub fn new(span: TimeSpan, convention: UnitConvention) -> Self {
        Self { span, convention }
    }

    pub fn parse(text: &str, convention: UnitConvention) -> Result<Self, ParseError> {
        Ok(Self::new(TimeSpan::parse(text, convention)?, convention))
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.convention.default_style();
        f.write_str(&self.span.format(self.convention, &style))
    }
}
