//! Scheduling pipeline
//!
//! Validation, ordering, calendar projection, critical path analysis and
//! metrics, wired together. Every run owns its working state, so independent
//! runs can proceed on separate threads without coordination.

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::calendar::{self, WorkCalendar};
use super::critical::{self, CriticalPath};
use super::graph::{InvalidSchedule, TaskGraph};
use super::order;
use super::task::{ScheduleMetrics, ScheduleResult, ScheduledTask, TaskInput};

/// Inputs to a scheduling run beyond the task list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleOptions {
    /// First day the calendar cursor may use
    pub start_date: NaiveDate,
    pub calendar: WorkCalendar,
}

impl ScheduleOptions {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            calendar: WorkCalendar::default(),
        }
    }

    /// Options starting from today's local date
    pub fn starting_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Builder-style: sets the working calendar
    pub fn with_calendar(mut self, calendar: WorkCalendar) -> Self {
        self.calendar = calendar;
        self
    }
}

/// Validates the tasks and returns them in recommended order
pub fn recommended_order(tasks: &[TaskInput]) -> Result<Vec<&TaskInput>, InvalidSchedule> {
    let graph = TaskGraph::from_tasks(tasks)?;
    debug!(tasks = graph.len(), "task graph validated");

    let ordered = order::topological_order(tasks, &graph);
    debug!(order = ?ordered.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), "tasks ordered");
    Ok(ordered)
}

/// Validates the tasks and runs the critical path analysis alone
pub fn critical_path(tasks: &[TaskInput]) -> Result<CriticalPath, InvalidSchedule> {
    let ordered = recommended_order(tasks)?;
    Ok(critical::analyze(&ordered))
}

/// Produces a full schedule for the tasks
///
/// Fails on the first validation problem; no partial schedule is returned.
pub fn generate_schedule(
    tasks: &[TaskInput],
    options: &ScheduleOptions,
) -> Result<ScheduleResult, InvalidSchedule> {
    let ordered = recommended_order(tasks)?;

    let projection = calendar::project(&ordered, options.start_date, &options.calendar);
    let critical = critical::analyze(&ordered);
    debug!(
        duration_hours = critical.project_duration,
        critical = ?critical.critical_titles(),
        "critical path computed"
    );

    let schedule: Vec<ScheduledTask> = ordered
        .iter()
        .zip(&projection.tasks)
        .enumerate()
        .map(|(i, (task, placed))| ScheduledTask {
            title: task.title.clone(),
            estimated_hours: task.estimated_hours,
            dependencies: task.dependencies.clone(),
            suggested_start: placed.start,
            suggested_end: placed.end,
            order_index: i + 1,
            is_critical_path: critical.is_critical(&task.title),
        })
        .collect();

    let metrics = ScheduleMetrics::aggregate(&schedule, options.start_date);
    debug!(
        start = %metrics.project_start,
        end = %metrics.project_end,
        warnings = projection.warnings.len(),
        "schedule generated"
    );

    Ok(ScheduleResult {
        recommended_order: ordered.iter().map(|t| t.title.clone()).collect(),
        schedule,
        warnings: projection.warnings,
        metrics,
    })
}
