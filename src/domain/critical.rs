//! Critical path analysis
//!
//! Forward and backward passes over the ordered task list, in hour units.
//! Calendar effects (weekends, the single-track cursor) are ignored here:
//! this measures the dependency structure alone.

use serde::Serialize;
use std::collections::HashMap;

use super::task::TaskInput;

/// Slack below this many hours counts as zero
pub const SLACK_EPSILON: f64 = 0.01;

/// Timing of one task in the hour-unit network
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTiming {
    pub title: String,
    pub estimated_hours: f64,
    pub earliest_start: f64,
    pub latest_start: f64,
    pub slack: f64,
    pub critical: bool,
}

/// Result of the critical path analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPath {
    /// Longest chain through the network, in hours
    pub project_duration: f64,
    /// One entry per task, in the order analysed
    pub timings: Vec<TaskTiming>,
}

impl CriticalPath {
    /// Returns true if the task has zero slack
    pub fn is_critical(&self, title: &str) -> bool {
        self.timing(title).is_some_and(|t| t.critical)
    }

    /// Looks up the timing for a task
    pub fn timing(&self, title: &str) -> Option<&TaskTiming> {
        self.timings.iter().find(|t| t.title == title)
    }

    /// Titles of zero-slack tasks, in analysis order
    pub fn critical_titles(&self) -> Vec<&str> {
        self.timings
            .iter()
            .filter(|t| t.critical)
            .map(|t| t.title.as_str())
            .collect()
    }

    /// Sum of estimated hours over critical tasks
    pub fn length(&self) -> f64 {
        self.timings
            .iter()
            .filter(|t| t.critical)
            .map(|t| t.estimated_hours)
            .sum()
    }
}

/// Builds a reverse dependency map: title -> titles that depend on it
fn dependents_map<'a>(ordered: &[&'a TaskInput]) -> HashMap<&'a str, Vec<&'a str>> {
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::with_capacity(ordered.len());
    for task in ordered {
        for dep in &task.dependencies {
            dependents.entry(dep.as_str()).or_default().push(task.title.as_str());
        }
    }
    dependents
}

/// Runs the forward and backward passes
///
/// `ordered` must be a topological order of a validated task set.
pub fn analyze(ordered: &[&TaskInput]) -> CriticalPath {
    let hours: HashMap<&str, f64> = ordered
        .iter()
        .map(|t| (t.title.as_str(), t.estimated_hours))
        .collect();

    // Forward pass: earliest start
    let mut earliest: HashMap<&str, f64> = HashMap::with_capacity(ordered.len());
    for task in ordered {
        let es = task
            .dependencies
            .iter()
            .map(|dep| {
                earliest.get(dep.as_str()).copied().unwrap_or(0.0)
                    + hours.get(dep.as_str()).copied().unwrap_or(0.0)
            })
            .fold(0.0, f64::max);
        earliest.insert(task.title.as_str(), es);
    }

    let project_duration = ordered
        .iter()
        .map(|t| earliest[t.title.as_str()] + t.estimated_hours)
        .fold(0.0, f64::max);

    // Backward pass: latest start
    let dependents = dependents_map(ordered);
    let mut latest: HashMap<&str, f64> = HashMap::with_capacity(ordered.len());
    for task in ordered.iter().rev() {
        let finish_by = dependents
            .get(task.title.as_str())
            .and_then(|deps| {
                deps.iter()
                    .filter_map(|d| latest.get(d).copied())
                    .reduce(f64::min)
            })
            .unwrap_or(project_duration);
        latest.insert(task.title.as_str(), finish_by - task.estimated_hours);
    }

    let timings = ordered
        .iter()
        .map(|task| {
            let title = task.title.as_str();
            let earliest_start = earliest[title];
            let latest_start = latest[title];
            let slack = latest_start - earliest_start;
            TaskTiming {
                title: task.title.clone(),
                estimated_hours: task.estimated_hours,
                earliest_start,
                latest_start,
                slack,
                critical: slack.abs() < SLACK_EPSILON,
            }
        })
        .collect();

    CriticalPath {
        project_duration,
        timings,
    }
}
