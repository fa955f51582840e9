//! Working-day scheduling and effort projection.
//!
//! - [`calendar`]: counting and adding working days, with a pluggable
//!   [`WorkCalendar`] predicate for holidays.
//! - [`span`]: signed time spans and the `"1w 2d 3h"` duration grammar in
//!   calendar or work units.
//! - [`projection`]: efficiency, expected progress, man delay, work-days delay
//!   and release projection for a task or sprint.
//! - [`config`]: work week and holidays from `~/.pace/config.toml`.

pub mod calendar;
pub mod config;
pub mod projection;
pub mod span;

pub use calendar::{HolidayCalendar, WorkCalendar, Weekends};
pub use projection::{EffortRecord, Progress, ProjectionReport, Projector, Timeline};
pub use span::{DurationStyle, Estimate, TimeSpan, UnitConvention, WorkWeek};
