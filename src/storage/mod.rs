//! # Storage Layer
//!
//! Everything that touches the filesystem or stdin: configuration and
//! scheduling requests. Nothing is ever written back.
//!
//! ## Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Requests | JSON or YAML (by extension) | any path, or `-` for stdin |
//! | Config | TOML | `--config`, `./taskplan.toml`, or the global config dir |
//!
//! ## Key Types
//!
//! - [`TaskScheduleRequest`] - Tasks to schedule, field-checked on load
//! - [`Config`] - Calendar, limits and output defaults

mod config;
mod request;

pub use config::{CalendarConfig, Config, ConfigError, LimitsConfig, OutputFormat, LOCAL_CONFIG_FILE};
pub use request::{
    load_request, RequestError, RequestFormat, TaskScheduleRequest, MAX_ESTIMATED_HOURS,
    MIN_ESTIMATED_HOURS,
};
