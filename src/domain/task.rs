//! Task domain model
//!
//! Input tasks as supplied by a scheduling request, and the per-task and
//! aggregate records produced by the scheduling pipeline.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A task to be scheduled
///
/// The title is the task's identity: dependencies refer to other tasks by
/// title, and titles must be unique within one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Unique task title
    pub title: String,

    /// Effort estimate in hours
    pub estimated_hours: f64,

    /// Deadline for the task
    #[serde(
        deserialize_with = "deserialize_due_date",
        serialize_with = "serialize_due_date"
    )]
    pub due_date: NaiveDateTime,

    /// Titles of tasks that must finish before this one starts
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Higher is more urgent; absent means 0
    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: i32,
}

impl TaskInput {
    /// Creates a task with no dependencies and default priority
    pub fn new(title: impl Into<String>, estimated_hours: f64, due_date: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            estimated_hours,
            due_date,
            dependencies: Vec::new(),
            priority: 0,
        }
    }

    /// Builder-style: adds a dependency on another task
    pub fn depends_on(mut self, title: impl Into<String>) -> Self {
        self.dependencies.push(title.into());
        self
    }

    /// Builder-style: sets the priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Returns true if the task has no dependencies
    pub fn is_root(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// A task placed on the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub title: String,
    pub estimated_hours: f64,
    pub dependencies: Vec<String>,
    pub suggested_start: NaiveDate,
    pub suggested_end: NaiveDate,
    /// 1-based position in the recommended order
    pub order_index: usize,
    pub is_critical_path: bool,
}

/// Aggregate figures over a whole schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    pub project_start: NaiveDate,
    pub project_end: NaiveDate,
    pub total_hours: f64,
    pub total_tasks: usize,
    /// Sum of estimated hours over critical tasks
    pub critical_path_length: f64,
}

/// Output of one scheduling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    pub recommended_order: Vec<String>,
    pub schedule: Vec<ScheduledTask>,
    pub warnings: Vec<String>,
    pub metrics: ScheduleMetrics,
}

impl ScheduleResult {
    /// Looks up a scheduled task by title
    pub fn task(&self, title: &str) -> Option<&ScheduledTask> {
        self.schedule.iter().find(|t| t.title == title)
    }

    /// Titles of tasks flagged as critical, in schedule order
    pub fn critical_titles(&self) -> Vec<&str> {
        self.schedule
            .iter()
            .filter(|t| t.is_critical_path)
            .map(|t| t.title.as_str())
            .collect()
    }
}

/// Parses a due date in any of the accepted forms
///
/// - `2025-11-25` (midnight)
/// - `2025-11-25T17:00` or `2025-11-25T17:00:00` (also with a space separator)
/// - RFC 3339 with offset, e.g. `2025-11-25T17:00:00+02:00` (wall-clock time kept)
pub fn parse_due_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid dueDate: '{}'", raw)))
}

fn serialize_due_date<S>(due: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&due.format(DUE_DATE_FORMAT))
}

fn deserialize_priority<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}
