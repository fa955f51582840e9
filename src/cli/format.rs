//! Output formatting for CLI display.

use jiff::civil::DateTime;

use pace::projection::{ProjectionReport, person_efficiency_label};
use pace::span::{DurationStyle, TimeSpan, WorkWeek, format_work_duration};

/// Shown for metrics that could not be computed.
const UNKNOWN: &str = "-";

pub(super) fn format_timestamp(t: DateTime) -> String {
    t.strftime("%Y-%m-%d %H:%M").to_string()
}

/// Format a projection report as aligned `label  value` lines.
pub(super) fn format_report(report: &ProjectionReport, week: &WorkWeek) -> String {
    let effort = |span: Option<TimeSpan>| match span {
        Some(s) if s.is_zero() => "0".to_string(),
        Some(s) => format_work_duration(s, week, &DurationStyle::work()),
        None => UNKNOWN.to_string(),
    };
    let percent = |ratio: Option<f64>| {
        ratio.map_or_else(|| UNKNOWN.to_string(), |r| format!("{:.0}%", r * 100.0))
    };
    let person = |ratio: Option<f64>| match person_efficiency_label(ratio) {
        label if label.is_empty() => UNKNOWN.to_string(),
        label => label,
    };

    let t = &report.timeline;
    let rows = [
        ("Start", format_timestamp(t.start)),
        ("Now", format_timestamp(t.now)),
        ("End", format_timestamp(t.end)),
        ("Worked", effort(report.worked)),
        ("Remaining", effort(report.remaining)),
        ("Progress", percent(report.progress)),
        ("Expected progress", percent(report.expected_progress)),
        ("Efficiency", person(report.efficiency)),
        ("Optimal efficiency", person(report.optimal_efficiency)),
        ("Man delay", effort(report.man_delay)),
        ("Work-days delay", effort(report.work_days_delay)),
        (
            "Release",
            report
                .release_date
                .map_or_else(|| UNKNOWN.to_string(), format_timestamp),
        ),
        ("Schedule overrun", effort(report.extrapolated_schedule_delay)),
    ];

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{label:<width$}  {value}\n"))
        .collect()
}
