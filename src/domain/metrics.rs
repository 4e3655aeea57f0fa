//! Schedule metrics

use chrono::NaiveDate;

use super::task::{ScheduleMetrics, ScheduledTask};

impl ScheduleMetrics {
    /// Summarizes a schedule
    ///
    /// An empty schedule starts and ends on `fallback`.
    pub fn aggregate(schedule: &[ScheduledTask], fallback: NaiveDate) -> Self {
        let project_start = schedule
            .iter()
            .map(|t| t.suggested_start)
            .min()
            .unwrap_or(fallback);
        let project_end = schedule
            .iter()
            .map(|t| t.suggested_end)
            .max()
            .unwrap_or(fallback);

        Self {
            project_start,
            project_end,
            total_hours: schedule.iter().map(|t| t.estimated_hours).sum(),
            total_tasks: schedule.len(),
            critical_path_length: schedule
                .iter()
                .filter(|t| t.is_critical_path)
                .map(|t| t.estimated_hours)
                .sum(),
        }
    }
}
