//! Scheduling request loading
//!
//! A request is a JSON or YAML document holding the tasks to schedule,
//! either as `{ "tasks": [...] }` or as a bare array. Field ranges and
//! request size are checked here, before anything reaches the pipeline.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::LimitsConfig;
use crate::domain::TaskInput;

/// Smallest accepted effort estimate, in hours
pub const MIN_ESTIMATED_HOURS: f64 = 0.5;

/// Largest accepted effort estimate, in hours
pub const MAX_ESTIMATED_HOURS: f64 = 1000.0;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to read request {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to parse request: {0}")]
    Parse(String),

    #[error("Task #{0} has an empty title")]
    EmptyTitle(usize),

    #[error(
        "Task '{title}' has estimatedHours {hours}; expected {min} to {max}",
        min = MIN_ESTIMATED_HOURS,
        max = MAX_ESTIMATED_HOURS
    )]
    HoursOutOfRange { title: String, hours: f64 },

    #[error("Request has {count} tasks; at most {max} are allowed")]
    TooManyTasks { count: usize, max: usize },

    #[error("Task '{title}' has {count} dependencies; at most {max} are allowed")]
    TooManyDependencies {
        title: String,
        count: usize,
        max: usize,
    },
}

/// Document format of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Json,
    Yaml,
}

impl RequestFormat {
    /// Picks the format from a file extension; JSON unless `.yaml`/`.yml`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                RequestFormat::Yaml
            }
            _ => RequestFormat::Json,
        }
    }
}

/// A scheduling request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskScheduleRequest {
    pub tasks: Vec<TaskInput>,
}

impl TaskScheduleRequest {
    /// Parses request text in the given format
    pub fn parse(content: &str, format: RequestFormat) -> Result<Self, RequestError> {
        let document: serde_json::Value = match format {
            RequestFormat::Json => serde_json::from_str(content).map_err(|e| RequestError::Parse(e.to_string()))?,
            RequestFormat::Yaml => serde_yaml::from_str(content).map_err(|e| RequestError::Parse(e.to_string()))?,
        };

        // Both `{ "tasks": [...] }` and a bare array are accepted
        let request = if document.is_array() {
            serde_json::from_value(document).map(|tasks| Self { tasks })
        } else {
            serde_json::from_value(document)
        };
        request.map_err(|e| RequestError::Parse(e.to_string()))
    }

    /// Checks field ranges and request size
    pub fn check(&self, limits: &LimitsConfig) -> Result<(), RequestError> {
        if self.tasks.len() > limits.max_tasks {
            return Err(RequestError::TooManyTasks {
                count: self.tasks.len(),
                max: limits.max_tasks,
            });
        }

        for (i, task) in self.tasks.iter().enumerate() {
            if task.title.trim().is_empty() {
                return Err(RequestError::EmptyTitle(i + 1));
            }

            let hours = task.estimated_hours;
            if !hours.is_finite() || !(MIN_ESTIMATED_HOURS..=MAX_ESTIMATED_HOURS).contains(&hours) {
                return Err(RequestError::HoursOutOfRange {
                    title: task.title.clone(),
                    hours,
                });
            }

            if task.dependencies.len() > limits.max_dependencies {
                return Err(RequestError::TooManyDependencies {
                    title: task.title.clone(),
                    count: task.dependencies.len(),
                    max: limits.max_dependencies,
                });
            }
        }

        Ok(())
    }
}

/// Reads, parses and checks a request
///
/// `source` is a file path, or `-` for stdin (read as JSON).
pub fn load_request(source: &str, limits: &LimitsConfig) -> Result<TaskScheduleRequest, RequestError> {
    let (content, format) = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|error| RequestError::Io {
                source_name: "stdin".to_string(),
                error,
            })?;
        (buf, RequestFormat::Json)
    } else {
        let path = Path::new(source);
        let content = fs::read_to_string(path).map_err(|error| RequestError::Io {
            source_name: path.display().to_string(),
            error,
        })?;
        (content, RequestFormat::from_path(path))
    };

    let request = TaskScheduleRequest::parse(&content, format)?;
    request.check(limits)?;
    tracing::debug!(source, tasks = request.tasks.len(), "request loaded");
    Ok(request)
}
