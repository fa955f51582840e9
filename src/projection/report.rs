//! Bundled projection results.

use jiff::civil::DateTime;
use serde::Serialize;

use super::Timeline;
use crate::span::TimeSpan;

/// Every projection metric for one effort record.
///
/// Fields that could not be computed are `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    pub timeline: Timeline,
    pub worked: Option<TimeSpan>,
    pub remaining: Option<TimeSpan>,
    pub total_effort: Option<TimeSpan>,
    pub progress: Option<f64>,
    pub expected_progress: Option<f64>,
    pub efficiency: Option<f64>,
    pub optimal_efficiency: Option<f64>,
    pub man_delay: Option<TimeSpan>,
    pub delay_fraction: Option<f64>,
    pub work_days_delay: Option<TimeSpan>,
    pub release_date: Option<DateTime>,
    pub extrapolated_schedule_delay: Option<TimeSpan>,
    pub extrapolated_time_spent: Option<TimeSpan>,
}

/// `"83% Person"`, or `""` without an efficiency.
#[allow(clippy::cast_possible_truncation)] // Efficiencies are small ratios.
pub fn person_efficiency_label(efficiency: Option<f64>) -> String {
    efficiency
        .map(|e| format!("{}% Person", (e * 100.0).round() as i64))
        .unwrap_or_default()
}
