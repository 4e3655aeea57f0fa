//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `schedule` | Full schedule: order, dates, critical path, warnings |
//! | `order` | Recommended execution order only |
//! | `critical` | Earliest/latest start and slack per task |
//! | `validate` | Check a request without scheduling it |
//! | `sample` | Print a starter request |
//! | `config` | Show the effective configuration |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the config file.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! taskplan --verbose schedule plan.json
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command,
//! and [`exit_code()`] to map a failure to the process exit status.

mod app;
mod output;
mod schedule_cmd;

pub use app::{exit_code, run, Cli, Commands, EXIT_INVALID_INPUT};
pub use output::{Output, OutputFormat};
pub use schedule_cmd::sample_request;
