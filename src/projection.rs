//! Effort and schedule projection.
//!
//! Every metric compares recorded effort against the working days of a
//! [`Timeline`]. "Elapsed" days are the working days in `[start, now]`,
//! "total" days those in `[start, end]`, both inclusive and on calendar dates
//! only, so the time of day never shifts a count.
//!
//! Unknown inputs (no remaining estimate, a zero-length plan) produce `None`
//! or [`Progress::Unknown`] rather than errors.

mod report;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{WorkCalendar, Weekends};
use crate::span::{DurationStyle, TimeSpan, WorkWeek, format_work_duration};

pub use report::{ProjectionReport, person_efficiency_label};

/// The three instants most projections are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub start: DateTime,
    pub now: DateTime,
    pub end: DateTime,
}

impl Timeline {
    pub fn new(start: DateTime, now: DateTime, end: DateTime) -> Self {
        Self { start, now, end }
    }

    /// Whether the evaluation instant is past the planned end.
    pub fn is_overdue(&self) -> bool {
        self.now > self.end
    }
}

/// Recorded effort for one task or sprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortRecord {
    pub timeline: Timeline,
    pub worked: Option<TimeSpan>,
    /// `None` when nobody has estimated what is left.
    pub remaining: Option<TimeSpan>,
    /// Carried for reporting. Projections do not read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_estimate: Option<TimeSpan>,
    /// Carried for reporting. Projections do not read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<TimeSpan>,
}

impl EffortRecord {
    pub fn new(timeline: Timeline, worked: Option<TimeSpan>, remaining: Option<TimeSpan>) -> Self {
        Self {
            timeline,
            worked,
            remaining,
            original_estimate: None,
            estimate: None,
        }
    }

    /// `worked + remaining`, when both are known.
    pub fn total_effort(&self) -> Option<TimeSpan> {
        Some(self.worked? + self.remaining?)
    }
}

/// Share of the total effort already worked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Unknown,
    Ratio(f64),
}

impl Progress {
    pub fn ratio(self) -> Option<f64> {
        match self {
            Self::Unknown => None,
            Self::Ratio(r) => Some(r),
        }
    }

    /// The ratio, or `-1.0` for displays that expect a numeric marker.
    pub fn sentinel(self) -> f64 {
        self.ratio().unwrap_or(-1.0)
    }
}

/// `worked / total_effort`.
pub fn progress(worked: Option<TimeSpan>, total_effort: Option<TimeSpan>) -> Progress {
    match (worked, total_effort) {
        (Some(worked), Some(total)) => worked.ratio(total).map_or(Progress::Unknown, Progress::Ratio),
        _ => Progress::Unknown,
    }
}

/// Projection calculator over a working-day calendar.
#[derive(Debug, Clone)]
pub struct Projector<C = Weekends> {
    calendar: C,
    week: WorkWeek,
}

impl Projector<Weekends> {
    /// Saturday/Sunday weekends and the default 7.5-hour day.
    pub fn new() -> Self {
        Self::with_calendar(Weekends, WorkWeek::default())
    }
}

impl Default for Projector<Weekends> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: WorkCalendar> Projector<C> {
    pub fn with_calendar(calendar: C, week: WorkWeek) -> Self {
        Self { calendar, week }
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn work_week(&self) -> &WorkWeek {
        &self.week
    }

    /// Working days in `[from, to]`, by date.
    fn working_days(&self, from: DateTime, to: DateTime) -> i64 {
        self.calendar.count_working_days_inclusive(from.date(), to.date())
    }

    fn workday_millis(&self) -> i128 {
        self.week.workday().as_millis()
    }

    /// Elapsed working days over total working days, 1.0 once overdue.
    ///
    /// `None` when the plan holds no working day.
    pub fn expected_progress(&self, timeline: &Timeline) -> Option<f64> {
        let total = self.working_days(timeline.start, timeline.end);
        if total == 0 {
            tracing::warn!(start = %timeline.start, end = %timeline.end, "plan has no working days");
            return None;
        }
        if timeline.is_overdue() {
            return Some(1.0);
        }
        let elapsed = self.working_days(timeline.start, timeline.now);
        Some(elapsed as f64 / total as f64)
    }

    /// Like [`Self::expected_progress`], but 0.0 until there is both worked
    /// effort and a remaining estimate.
    pub fn expected_progress_of(&self, record: &EffortRecord) -> Option<f64> {
        let started = record.worked.is_some_and(|w| !w.is_zero());
        if record.remaining.is_none() || !started {
            return Some(0.0);
        }
        self.expected_progress(&record.timeline)
    }

    /// Effort produced per elapsed working-day budget.
    ///
    /// `None` when no working day has elapsed or `remaining` is unknown.
    /// `now` is not clamped to `end`.
    pub fn efficiency(
        &self,
        timeline: &Timeline,
        worked: TimeSpan,
        remaining: Option<TimeSpan>,
    ) -> Option<f64> {
        remaining?;
        let elapsed = self.working_days(timeline.start, timeline.now);
        if elapsed == 0 {
            return None;
        }
        worked.ratio(self.week.workdays(elapsed))
    }

    /// Efficiency needed to finish `total_effort` exactly on `end`.
    pub fn optimal_efficiency(
        &self,
        start: DateTime,
        end: DateTime,
        total_effort: TimeSpan,
    ) -> Option<f64> {
        let total = self.working_days(start, end);
        if total == 0 {
            return None;
        }
        total_effort.ratio(self.week.workdays(total))
    }

    /// Effort an even pace would have produced by `now`.
    fn expected_work(&self, timeline: &Timeline, total_effort: TimeSpan) -> Option<i128> {
        let total = self.working_days(timeline.start, timeline.end);
        if total == 0 {
            return None;
        }
        if timeline.is_overdue() {
            return Some(total_effort.as_millis());
        }
        let elapsed = self.working_days(timeline.start, timeline.now);
        Some(total_effort.as_millis() * i128::from(elapsed) / i128::from(total))
    }

    /// Expected minus worked effort. Positive means behind plan.
    pub fn man_delay(
        &self,
        timeline: &Timeline,
        worked: TimeSpan,
        total_effort: Option<TimeSpan>,
    ) -> Option<TimeSpan> {
        let expected = self.expected_work(timeline, total_effort?)?;
        TimeSpan::from_millis_i128(expected - worked.as_millis())
    }

    /// The man delay as a share of the total effort.
    pub fn delay_fraction(
        &self,
        timeline: &Timeline,
        worked: TimeSpan,
        total_effort: TimeSpan,
    ) -> Option<f64> {
        self.man_delay(timeline, worked, Some(total_effort))?
            .ratio(total_effort)
    }

    /// The man delay in the work format, or `""` when it cannot be computed.
    pub fn man_delay_label(
        &self,
        timeline: &Timeline,
        worked: TimeSpan,
        total_effort: Option<TimeSpan>,
    ) -> String {
        if timeline.start == timeline.end {
            return String::new();
        }
        self.man_delay(timeline, worked, total_effort)
            .map(|delay| format_work_duration(delay, &self.week, &DurationStyle::work()))
            .unwrap_or_default()
    }

    /// The day the current pace finishes `total_effort`, at `start`'s time of day.
    ///
    /// Counts `ceil(total_effort * elapsed / worked)` working days from
    /// `start`. Returns `now` when nothing remains.
    pub fn release_date(
        &self,
        start: DateTime,
        now: DateTime,
        worked: Option<TimeSpan>,
        total_effort: Option<TimeSpan>,
    ) -> Option<DateTime> {
        let (worked, total) = (worked?, total_effort?);
        if worked <= TimeSpan::ZERO {
            return None;
        }
        if total <= worked {
            return Some(now);
        }
        let elapsed = self.working_days(start, now);
        if elapsed == 0 {
            return None;
        }

        let needed = total.as_millis().checked_mul(i128::from(elapsed))?;
        let days = i64::try_from(div_ceil(needed, worked.as_millis())).ok()?;
        match self.calendar.add_working_days(start, days) {
            Ok(release) => {
                tracing::debug!(%start, days, %release, "projected release");
                Some(release)
            }
            Err(e) => {
                tracing::warn!(%start, days, "release projection out of range: {e}");
                None
            }
        }
    }

    /// Working days from the planned end to the projected release, as effort.
    pub fn extrapolated_schedule_delay(
        &self,
        timeline: &Timeline,
        worked: TimeSpan,
        total_effort: TimeSpan,
    ) -> Option<TimeSpan> {
        let days = self.extrapolated_days(timeline, worked, total_effort)?;
        Some(self.week.workdays(days))
    }

    /// [`Self::extrapolated_schedule_delay`] as a share of the planned working days.
    pub fn extrapolated_schedule_delay_fraction(
        &self,
        timeline: &Timeline,
        worked: TimeSpan,
        total_effort: TimeSpan,
    ) -> Option<f64> {
        let days = self.extrapolated_days(timeline, worked, total_effort)?;
        let scheduled = self.working_days(timeline.start, timeline.end);
        if scheduled == 0 {
            return None;
        }
        Some(days as f64 / scheduled as f64)
    }

    fn extrapolated_days(
        &self,
        timeline: &Timeline,
        worked: TimeSpan,
        total_effort: TimeSpan,
    ) -> Option<i64> {
        if timeline.start == timeline.end {
            return None;
        }
        let release =
            self.release_date(timeline.start, timeline.now, Some(worked), Some(total_effort))?;
        Some(self.working_days(timeline.end, release))
    }

    /// Expected work-days delay at the team's current pace.
    ///
    /// The man delay of `worked + remaining`, divided by the effort produced
    /// per working-day budget so far.
    pub fn work_days_delay(
        &self,
        timeline: &Timeline,
        worked: TimeSpan,
        remaining: Option<TimeSpan>,
    ) -> Option<TimeSpan> {
        let remaining = remaining?;
        if worked <= TimeSpan::ZERO {
            return None;
        }
        let elapsed = self.working_days(timeline.start, timeline.now);
        if elapsed == 0 {
            return None;
        }
        let expected = self.expected_work(timeline, worked + remaining)?;
        let budget = i128::from(elapsed) * self.workday_millis();
        let delay = (expected - worked.as_millis()).checked_mul(budget)? / worked.as_millis();
        TimeSpan::from_millis_i128(delay)
    }

    /// Every metric for one record.
    pub fn report(&self, record: &EffortRecord) -> ProjectionReport {
        let timeline = &record.timeline;
        let total = record.total_effort();
        let worked = record.worked.unwrap_or(TimeSpan::ZERO);

        let report = ProjectionReport {
            timeline: *timeline,
            worked: record.worked,
            remaining: record.remaining,
            total_effort: total,
            progress: progress(record.worked, total).ratio(),
            expected_progress: self.expected_progress_of(record),
            efficiency: record
                .worked
                .and_then(|w| self.efficiency(timeline, w, record.remaining)),
            optimal_efficiency: total
                .and_then(|t| self.optimal_efficiency(timeline.start, timeline.end, t)),
            man_delay: self.man_delay(timeline, worked, total),
            delay_fraction: total.and_then(|t| self.delay_fraction(timeline, worked, t)),
            work_days_delay: self.work_days_delay(timeline, worked, record.remaining),
            release_date: self.release_date(timeline.start, timeline.now, record.worked, total),
            extrapolated_schedule_delay: total
                .and_then(|t| self.extrapolated_schedule_delay(timeline, worked, t)),
            extrapolated_time_spent: record
                .worked
                .and_then(|w| extrapolated_time_spent(timeline, w)),
        };
        tracing::debug!(?report, "projected");
        report
    }
}

/// Calendar-time extrapolation of `spent` over the whole plan:
/// `(end - start) * spent / (now - start)`.
pub fn extrapolated_time_spent(timeline: &Timeline, spent: TimeSpan) -> Option<TimeSpan> {
    let past = timeline.start.duration_until(timeline.now).as_millis();
    if past == 0 {
        return None;
    }
    let planned = timeline.start.duration_until(timeline.end).as_millis();
    TimeSpan::from_millis_i128(planned.checked_mul(spent.as_millis())? / past)
}

/// Ceiling division for a positive divisor.
fn div_ceil(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d > 0 { q + 1 } else { q }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::calendar::HolidayCalendar;

    const EPSILON: f64 = 0.001;

    fn at8(y: i16, m: i8, d: i8) -> DateTime {
        date(y, m, d).at(8, 0, 0, 0)
    }

    fn days(n: i64) -> TimeSpan {
        WorkWeek::default().workdays(n)
    }

    fn minutes(n: i64) -> TimeSpan {
        TimeSpan::from_minutes(n)
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("ratio should be defined");
        assert!((actual - expected).abs() < EPSILON, "{actual} != {expected}");
    }

    fn long_sprint() -> Timeline {
        Timeline::new(at8(2018, 1, 9), at8(2018, 2, 19), at8(2018, 4, 2))
    }

    fn short_week() -> Timeline {
        Timeline::new(at8(2018, 3, 12), at8(2018, 3, 14), at8(2018, 3, 16))
    }

    fn two_weeks_from(start_day: i8) -> Timeline {
        Timeline::new(at8(2018, 3, start_day), at8(2018, 3, 16), at8(2018, 3, 23))
    }

    /// The sprint behind the release and work-days delay references.
    fn ct2() -> Timeline {
        Timeline::new(
            date(2018, 8, 28).at(11, 17, 0, 0),
            date(2018, 9, 13).at(8, 39, 0, 0),
            date(2018, 10, 8).at(18, 0, 0, 0),
        )
    }

    #[test]
    fn progress_ratio() {
        assert_eq!(progress(Some(days(10)), Some(days(10))), Progress::Ratio(1.0));
        assert_eq!(progress(Some(days(5)), Some(days(10))), Progress::Ratio(0.5));
        assert_eq!(progress(Some(TimeSpan::ZERO), Some(days(10))), Progress::Ratio(0.0));
    }

    #[test]
    fn progress_unknown() {
        assert_eq!(progress(Some(days(5)), None), Progress::Unknown);
        assert_eq!(progress(None, Some(days(5))), Progress::Unknown);
        assert_eq!(progress(Some(days(5)), Some(TimeSpan::ZERO)), Progress::Unknown);
        assert_eq!(Progress::Unknown.sentinel(), -1.0);
        assert_eq!(Progress::Ratio(0.25).sentinel(), 0.25);
    }

    #[test]
    fn efficiency_literal_cases() {
        let p = Projector::new();
        assert_close(p.efficiency(&long_sprint(), days(10), Some(TimeSpan::ZERO)), 10.0 / 30.0);
        assert_close(p.efficiency(&short_week(), days(5), Some(days(5))), 5.0 / 3.0);
        assert_close(p.efficiency(&two_weeks_from(10), days(4), Some(days(6))), 4.0 / 5.0);
        assert_close(p.efficiency(&two_weeks_from(11), days(2), Some(days(8))), 2.0 / 5.0);
        assert_close(p.efficiency(&two_weeks_from(12), days(10), Some(TimeSpan::ZERO)), 2.0);
    }

    #[test]
    fn efficiency_undefined() {
        let p = Projector::new();
        assert_eq!(p.efficiency(&short_week(), days(5), None), None);
        // Weekend only: no working day has elapsed.
        let weekend = Timeline::new(at8(2018, 3, 10), at8(2018, 3, 11), at8(2018, 3, 23));
        assert_eq!(p.efficiency(&weekend, days(1), Some(days(1))), None);
    }

    #[test]
    fn efficiency_does_not_clamp_now() {
        let p = Projector::new();
        let overdue = Timeline::new(at8(2018, 3, 12), at8(2018, 3, 23), at8(2018, 3, 16));
        assert_close(p.efficiency(&overdue, days(10), Some(TimeSpan::ZERO)), 1.0);
    }

    #[test]
    fn expected_progress_literal_cases() {
        let p = Projector::new();
        assert_close(p.expected_progress(&short_week()), 0.6);
        assert_close(p.expected_progress(&long_sprint()), 0.5);
        assert_close(p.expected_progress(&two_weeks_from(10)), 0.5);
        assert_close(p.expected_progress(&two_weeks_from(11)), 0.5);
        assert_close(p.expected_progress(&two_weeks_from(12)), 0.5);
    }

    #[test]
    fn expected_progress_edges() {
        let p = Projector::new();
        let overdue = Timeline::new(at8(2018, 3, 12), at8(2018, 3, 26), at8(2018, 3, 23));
        assert_eq!(p.expected_progress(&overdue), Some(1.0));

        let weekend_plan = Timeline::new(at8(2018, 3, 10), at8(2018, 3, 10), at8(2018, 3, 11));
        assert_eq!(p.expected_progress(&weekend_plan), None);

        let not_started = Timeline::new(at8(2018, 3, 12), at8(2018, 3, 1), at8(2018, 3, 23));
        assert_eq!(p.expected_progress(&not_started), Some(0.0));
    }

    #[test]
    fn expected_progress_of_record() {
        let p = Projector::new();
        let mut record = EffortRecord::new(short_week(), Some(days(5)), Some(days(5)));
        assert_close(p.expected_progress_of(&record), 0.6);

        record.original_estimate = Some(days(3));
        record.estimate = Some(days(20));
        assert_close(p.expected_progress_of(&record), 0.6);

        record.remaining = None;
        assert_eq!(p.expected_progress_of(&record), Some(0.0));

        let idle = EffortRecord::new(short_week(), Some(TimeSpan::ZERO), Some(days(5)));
        assert_eq!(p.expected_progress_of(&idle), Some(0.0));
    }

    #[test]
    fn optimal_efficiency_literal_cases() {
        let p = Projector::new();
        let t = long_sprint();
        assert_close(p.optimal_efficiency(t.start, t.end, days(10)), 1.0 / 6.0);
        let t = short_week();
        assert_close(p.optimal_efficiency(t.start, t.end, days(10)), 2.0);
        for start_day in [10, 11, 12] {
            let t = two_weeks_from(start_day);
            assert_close(p.optimal_efficiency(t.start, t.end, days(10)), 1.0);
        }
        assert_eq!(p.optimal_efficiency(at8(2018, 3, 10), at8(2018, 3, 11), days(1)), None);
    }

    #[test]
    fn man_delay_literal_cases() {
        let p = Projector::new();
        let week = two_weeks_from(12);
        assert_eq!(p.man_delay(&week, days(4), Some(days(10))), Some(days(1)));
        assert_eq!(p.man_delay(&week, days(6), Some(days(10))), Some(-days(1)));
        assert_eq!(
            p.man_delay(&week, days(5) - minutes(17), Some(days(10))),
            Some(minutes(17))
        );
    }

    #[test]
    fn man_delay_on_plan() {
        let p = Projector::new();
        assert_eq!(p.man_delay(&long_sprint(), days(30), Some(days(60))), Some(TimeSpan::ZERO));
        assert_eq!(p.man_delay(&short_week(), days(3), Some(days(5))), Some(TimeSpan::ZERO));
        for start_day in [10, 11, 12] {
            let t = two_weeks_from(start_day);
            assert_eq!(p.man_delay(&t, days(5), Some(days(10))), Some(TimeSpan::ZERO));
        }
    }

    #[test]
    fn man_delay_once_overdue_uses_whole_effort() {
        let p = Projector::new();
        let overdue = Timeline::new(at8(2018, 3, 12), at8(2018, 3, 26), at8(2018, 3, 23));
        assert_eq!(p.man_delay(&overdue, days(7), Some(days(10))), Some(days(3)));
    }

    #[test]
    fn man_delay_unknown() {
        let p = Projector::new();
        assert_eq!(p.man_delay(&short_week(), days(3), None), None);
        let weekend_plan = Timeline::new(at8(2018, 3, 10), at8(2018, 3, 10), at8(2018, 3, 11));
        assert_eq!(p.man_delay(&weekend_plan, days(3), Some(days(5))), None);
    }

    #[test]
    fn man_delay_label_and_fraction() {
        let p = Projector::new();
        let week = two_weeks_from(12);
        assert_eq!(p.man_delay_label(&week, days(4), Some(days(10))), "1d");
        assert_eq!(p.man_delay_label(&week, days(6), Some(days(10))), "-1d");
        assert_eq!(p.man_delay_label(&week, days(5), Some(days(10))), "");
        assert_eq!(p.man_delay_label(&week, days(4), None), "");
        assert_close(p.delay_fraction(&week, days(4), days(10)), 0.1);
    }

    #[test]
    fn release_date_literal_cases() {
        let p = Projector::new();
        let (start, now) = (at8(2018, 3, 12), at8(2018, 3, 16));
        let release = |worked: TimeSpan, total: TimeSpan| {
            p.release_date(start, now, Some(worked), Some(total))
        };

        let finished = days(10) + minutes(5);
        assert_eq!(release(finished, finished), Some(now));
        assert_eq!(release(days(2), days(10)), Some(at8(2018, 4, 13)));
        assert_eq!(
            release(days(4) + minutes(5), days(10) + minutes(5)),
            Some(at8(2018, 3, 28))
        );
        assert_eq!(
            release(days(5) + minutes(5), days(10) + minutes(5)),
            Some(at8(2018, 3, 23))
        );
    }

    #[test]
    fn release_date_ct2() {
        let p = Projector::new();
        let t = ct2();
        let worked = days(7) + minutes(5) + TimeSpan::from_hours(5) + minutes(39);
        let remaining = days(16) + TimeSpan::from_hours(2) + minutes(31);
        assert_eq!(
            p.release_date(t.start, t.now, Some(worked), Some(worked + remaining)),
            Some(date(2018, 10, 23).at(11, 17, 0, 0))
        );
    }

    #[test]
    fn release_date_unknown() {
        let p = Projector::new();
        let (start, now) = (at8(2018, 3, 12), at8(2018, 3, 16));
        assert_eq!(p.release_date(start, now, None, Some(days(10))), None);
        assert_eq!(p.release_date(start, now, Some(days(1)), None), None);
        assert_eq!(p.release_date(start, now, Some(TimeSpan::ZERO), Some(days(10))), None);
        let sunday = at8(2018, 3, 11);
        assert_eq!(p.release_date(at8(2018, 3, 10), sunday, Some(days(1)), Some(days(2))), None);
    }

    #[test]
    fn release_date_beyond_any_calendar() {
        let p = Projector::new();
        // One elapsed day keeps the working-day count within i64, but
        // spreading it over weeks overflows.
        let release = p.release_date(
            at8(2018, 3, 12),
            at8(2018, 3, 12),
            Some(TimeSpan::from_millis(1)),
            Some(TimeSpan::from_hours(1_900_000_000)),
        );
        assert_eq!(release, None);
        let release = p.release_date(
            at8(2018, 1, 1),
            at8(2021, 12, 31),
            Some(TimeSpan::from_millis(1)),
            Some(TimeSpan::from_hours(1_900_000_000)),
        );
        assert_eq!(release, None);
    }

    #[test]
    fn release_date_skips_holidays() {
        let calendar: HolidayCalendar = [date(2018, 3, 30), date(2018, 4, 2)].into_iter().collect();
        let p = Projector::with_calendar(calendar, WorkWeek::default());
        let release = p.release_date(at8(2018, 3, 12), at8(2018, 3, 16), Some(days(4)), Some(days(10)));
        // 13 working days: 03-28 on the weekend model, Easter adds nothing yet.
        assert_eq!(release, Some(at8(2018, 3, 28)));
        let release = p.release_date(at8(2018, 3, 12), at8(2018, 3, 16), Some(days(2)), Some(days(10)));
        assert_eq!(release, Some(at8(2018, 4, 17)));
    }

    #[test]
    fn work_days_delay_ct2() {
        let p = Projector::new();
        let worked = days(7) + TimeSpan::from_hours(5) + minutes(39);
        let remaining = days(16) + TimeSpan::from_hours(2) + minutes(31);
        let delay = p.work_days_delay(&ct2(), worked, Some(remaining)).unwrap();
        assert_eq!(delay, TimeSpan::from_millis(121_560_619));
        assert_eq!(
            format_work_duration(delay, &WorkWeek::default(), &DurationStyle::work()),
            "4d 03h 46m"
        );
    }

    #[test]
    fn work_days_delay_undefined() {
        let p = Projector::new();
        let t = ct2();
        assert_eq!(p.work_days_delay(&t, days(1), None), None);
        assert_eq!(p.work_days_delay(&t, TimeSpan::ZERO, Some(days(1))), None);
        let weekend_plan = Timeline::new(at8(2018, 3, 10), at8(2018, 3, 10), at8(2018, 3, 11));
        assert_eq!(p.work_days_delay(&weekend_plan, days(1), Some(days(1))), None);
    }

    #[test]
    fn work_days_delay_on_plan_is_zero() {
        let p = Projector::new();
        let t = two_weeks_from(12);
        assert_eq!(p.work_days_delay(&t, days(5), Some(days(5))), Some(TimeSpan::ZERO));
    }

    #[test]
    fn extrapolated_schedule_delay() {
        let p = Projector::new();
        let t = two_weeks_from(12);
        // Release 2018-04-13 is 16 working days from the 03-23 end, inclusive.
        assert_eq!(p.extrapolated_schedule_delay(&t, days(2), days(10)), Some(days(16)));
        assert_close(p.extrapolated_schedule_delay_fraction(&t, days(2), days(10)), 1.6);
        // On time: the end day itself.
        assert_eq!(p.extrapolated_schedule_delay(&t, days(5), days(10)), Some(days(1)));
        // Ahead of plan: release before the end counts nothing.
        assert_eq!(p.extrapolated_schedule_delay(&t, days(8), days(10)), Some(TimeSpan::ZERO));
    }

    #[test]
    fn extrapolated_time_spent_is_linear() {
        let t = Timeline::new(at8(2018, 3, 12), at8(2018, 3, 14), at8(2018, 3, 20));
        assert_eq!(
            extrapolated_time_spent(&t, TimeSpan::from_hours(6)),
            Some(TimeSpan::from_hours(24))
        );
        let same = Timeline::new(at8(2018, 3, 12), at8(2018, 3, 12), at8(2018, 3, 20));
        assert_eq!(extrapolated_time_spent(&same, TimeSpan::from_hours(6)), None);
    }

    #[test]
    fn report_bundles_every_metric() {
        let p = Projector::new();
        let record = EffortRecord::new(two_weeks_from(12), Some(days(4)), Some(days(6)));
        let report = p.report(&record);
        assert_eq!(report.total_effort, Some(days(10)));
        assert_close(report.progress, 0.4);
        assert_close(report.expected_progress, 0.5);
        assert_close(report.efficiency, 0.8);
        assert_close(report.optimal_efficiency, 1.0);
        assert_eq!(report.man_delay, Some(days(1)));
        assert_close(report.delay_fraction, 0.1);
        assert_eq!(report.release_date, Some(at8(2018, 3, 28)));
        // One day behind at 0.8 days per day.
        assert_eq!(report.work_days_delay, Some(TimeSpan::from_millis(33_750_000)));
    }

    #[test]
    fn report_with_unknown_remaining() {
        let p = Projector::new();
        let record = EffortRecord::new(two_weeks_from(12), Some(days(4)), None);
        let report = p.report(&record);
        assert_eq!(report.total_effort, None);
        assert_eq!(report.progress, None);
        assert_eq!(report.expected_progress, Some(0.0));
        assert_eq!(report.efficiency, None);
        assert_eq!(report.man_delay, None);
        assert_eq!(report.release_date, None);
        assert_eq!(report.work_days_delay, None);
        assert!(report.extrapolated_time_spent.is_some());
    }

    #[test]
    fn report_with_unknown_worked() {
        let p = Projector::new();
        let record = EffortRecord::new(two_weeks_from(12), None, Some(days(6)));
        let report = p.report(&record);
        assert_eq!(report.progress, None);
        assert_eq!(report.efficiency, None);
        assert_eq!(report.release_date, None);
        assert_eq!(report.extrapolated_time_spent, None);
    }
}
