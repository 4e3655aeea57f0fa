//! Domain models for taskplan
//!
//! Contains the scheduling pipeline without any I/O concerns.

mod task;
mod graph;
mod order;
mod calendar;
mod critical;
mod metrics;
mod schedule;

pub use task::{parse_due_date, ScheduleMetrics, ScheduleResult, ScheduledTask, TaskInput};
pub use graph::{validate, InvalidSchedule, TaskGraph};
pub use order::topological_order;
pub use calendar::{project, ProjectedTask, Projection, WorkCalendar, DEFAULT_HOURS_PER_DAY};
pub use critical::{analyze, CriticalPath, TaskTiming, SLACK_EPSILON};
pub use schedule::{critical_path, generate_schedule, recommended_order, ScheduleOptions};
