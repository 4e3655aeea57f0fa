//! Configuration handling for taskplan
//!
//! Configuration is read from, in order of preference: an explicit path,
//! `./taskplan.toml`, then `~/.config/taskplan/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{WorkCalendar, DEFAULT_HOURS_PER_DAY};

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = "taskplan.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Working calendar settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    /// Working hours per calendar day
    pub hours_per_day: f64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }
}

impl CalendarConfig {
    pub fn calendar(&self) -> WorkCalendar {
        WorkCalendar::new(self.hours_per_day)
    }
}

/// Bounds on request size
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum tasks in one request
    pub max_tasks: usize,

    /// Maximum dependencies on a single task
    pub max_dependencies: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tasks: 1000,
            max_dependencies: 100,
        }
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    pub calendar: CalendarConfig,

    pub limits: LimitsConfig,

    /// File this configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from `path`, or from the default locations
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_file(path);
        }

        if let Some(local) = Self::find_local() {
            return Self::load_file(&local);
        }

        if let Some(global) = Self::global_config_dir().map(|dir| dir.join("config.toml")) {
            if global.is_file() {
                return Self::load_file(&global);
            }
        }

        Ok(Self::default())
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "taskplan", "taskplan").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns `./taskplan.toml` if it exists
    fn find_local() -> Option<PathBuf> {
        let path = std::env::current_dir().ok()?.join(LOCAL_CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Loads and validates a specific config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses and validates config text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hours = self.calendar.hours_per_day;
        if !hours.is_finite() || hours <= 0.0 || hours > 24.0 {
            return Err(ConfigError::Invalid(format!(
                "calendar.hours_per_day must be in (0, 24], got {}",
                hours
            )));
        }
        if self.limits.max_tasks == 0 {
            return Err(ConfigError::Invalid("limits.max_tasks must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Serializes the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
