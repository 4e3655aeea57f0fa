//! Calendar projection
//!
//! Turns an ordered task list into concrete start/end dates on a
//! Monday-to-Friday calendar. Tasks run one after another on a single track:
//! independent branches are serialized through a shared cursor, never run side
//! by side.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use std::collections::HashMap;

use super::task::TaskInput;

/// Working hours in one calendar day unless configured otherwise
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// Working-day calendar (weekends off)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkCalendar {
    hours_per_day: f64,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }
}

impl WorkCalendar {
    /// Creates a calendar with the given number of working hours per day
    ///
    /// Callers are expected to pass a positive value; configuration loading
    /// rejects anything else.
    pub fn new(hours_per_day: f64) -> Self {
        Self { hours_per_day }
    }

    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    /// Returns true for Monday through Friday
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns `date` itself if it is a working day, otherwise the next one
    pub fn roll_forward(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_working_day(current) {
            current = next_day(current);
        }
        current
    }

    /// Advances `start` by `days` working days
    ///
    /// The start day itself is not counted; each following weekday counts
    /// as one.
    pub fn add_working_days(&self, start: NaiveDate, days: u32) -> NaiveDate {
        let mut current = start;
        let mut added = 0;
        while added < days {
            current = next_day(current);
            if self.is_working_day(current) {
                added += 1;
            }
        }
        current
    }

    /// Whole working days needed for an effort estimate
    pub fn working_days_for(&self, hours: f64) -> u32 {
        (hours / self.hours_per_day).ceil() as u32
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

/// Calendar placement of a single task
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTask<'a> {
    pub title: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Output of the calendar projection
#[derive(Debug, Clone, Default)]
pub struct Projection<'a> {
    /// One entry per task, in the order given
    pub tasks: Vec<ProjectedTask<'a>>,
    /// Deadline warnings, in task order
    pub warnings: Vec<String>,
}

/// Places each task on the calendar, in order, starting at `start`
///
/// A task starts at the later of the cursor and its dependencies' end
/// dates, rolled forward past weekends. The cursor then moves to its end.
pub fn project<'a>(ordered: &[&'a TaskInput], start: NaiveDate, calendar: &WorkCalendar) -> Projection<'a> {
    let mut projection = Projection {
        tasks: Vec::with_capacity(ordered.len()),
        warnings: Vec::new(),
    };
    let mut end_dates: HashMap<&str, NaiveDate> = HashMap::with_capacity(ordered.len());
    let mut cursor = start;

    for task in ordered {
        let ready_at = task
            .dependencies
            .iter()
            .filter_map(|dep| end_dates.get(dep.as_str()).copied())
            .max()
            .map_or(cursor, |dep_end| dep_end.max(cursor));

        let task_start = calendar.roll_forward(ready_at);
        let days = calendar.working_days_for(task.estimated_hours);
        let task_end = calendar.add_working_days(task_start, days);

        if task_end.and_time(NaiveTime::MIN) > task.due_date {
            let warning = format!(
                "Task '{}' may miss deadline. Estimated completion: {}, Due: {}",
                task.title,
                task_end.format("%Y-%m-%d"),
                task.due_date.format("%Y-%m-%d"),
            );
            tracing::warn!(task = %task.title, end = %task_end, due = %task.due_date, "deadline at risk");
            projection.warnings.push(warning);
        }

        end_dates.insert(task.title.as_str(), task_end);
        cursor = task_end;

        projection.tasks.push(ProjectedTask {
            title: task.title.as_str(),
            start: task_start,
            end: task_end,
        });
    }

    projection
}
