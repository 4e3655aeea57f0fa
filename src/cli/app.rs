//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::schedule_cmd;
use crate::domain::InvalidSchedule;
use crate::logging;
use crate::storage::{Config, RequestError};

/// Exit code for problems with the request itself
pub const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Parser)]
#[command(name = "taskplan")]
#[command(author, version, about = "Dependency-aware task scheduling with critical path analysis")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a config file (TOML)
    #[arg(long, global = true, value_name = "PATH", env = "TASKPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a full schedule: order, dates, critical path, warnings
    ///
    /// Examples:
    ///   taskplan schedule plan.json
    ///   taskplan schedule plan.yaml --start 2025-11-17
    ///   cat plan.json | taskplan schedule -
    Schedule {
        /// Request file (JSON or YAML), or - for stdin
        input: String,

        /// First day the schedule may use (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// Working hours per day (overrides config)
        #[arg(long, value_name = "HOURS")]
        hours_per_day: Option<f64>,
    },

    /// Show the recommended execution order only
    Order {
        /// Request file (JSON or YAML), or - for stdin
        input: String,
    },

    /// Show earliest/latest start and slack for every task
    Critical {
        /// Request file (JSON or YAML), or - for stdin
        input: String,
    },

    /// Check a request without scheduling it
    Validate {
        /// Request file (JSON or YAML), or - for stdin
        input: String,
    },

    /// Print a sample request to start from
    Sample {
        /// Date the sample's due dates are relative to (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
        from: Option<NaiveDate>,
    },

    /// Show the effective configuration
    Config,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    match &config.source {
        Some(path) => output.verbose(&format!("Loaded config from {}", path.display())),
        None => output.verbose("Using default config"),
    }

    match cli.command {
        Commands::Schedule {
            input,
            start,
            hours_per_day,
        } => {
            output.verbose_ctx(
                "schedule",
                &format!("input={}, start={:?}, hours_per_day={:?}", input, start, hours_per_day),
            );
            schedule_cmd::schedule(&output, &config, &input, start, hours_per_day)?
        }
        Commands::Order { input } => schedule_cmd::order(&output, &config, &input)?,
        Commands::Critical { input } => schedule_cmd::critical(&output, &config, &input)?,
        Commands::Validate { input } => schedule_cmd::validate(&output, &config, &input)?,
        Commands::Sample { from } => schedule_cmd::sample(&output, from)?,
        Commands::Config => show_config(&output, &config)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Maps a failure to the process exit code
///
/// Problems with the request (unreadable, malformed, or an invalid task
/// graph) are the caller's to fix and get [`EXIT_INVALID_INPUT`]; anything
/// else is a general failure.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<InvalidSchedule>().is_some() || err.downcast_ref::<RequestError>().is_some() {
        EXIT_INVALID_INPUT
    } else {
        1
    }
}

/// Prints the effective configuration
fn show_config(output: &Output, config: &Config) -> Result<()> {
    let source = config
        .source
        .as_ref()
        .map(|p| p.display().to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "source": source,
            "config": config,
        }));
    } else {
        match source {
            Some(path) => println!("# loaded from {}", path),
            None => println!("# built-in defaults"),
        }
        print!("{}", config.to_toml()?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_schedule_flags() {
        let cli = Cli::try_parse_from([
            "taskplan",
            "schedule",
            "plan.json",
            "--start",
            "2025-11-17",
            "--hours-per-day",
            "6",
            "-f",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Schedule {
                input,
                start,
                hours_per_day,
            } => {
                assert_eq!(input, "plan.json");
                assert_eq!(start, NaiveDate::from_ymd_opt(2025, 11, 17));
                assert_eq!(hours_per_day, Some(6.0));
            }
            _ => panic!("expected schedule command"),
        }
    }

    #[test]
    fn rejects_bad_start_date() {
        assert!(Cli::try_parse_from(["taskplan", "schedule", "plan.json", "--start", "17/11/2025"]).is_err());
    }

    #[test]
    fn exit_codes() {
        let invalid = anyhow::Error::new(InvalidSchedule::DuplicateTitle("A".into()));
        assert_eq!(exit_code(&invalid), EXIT_INVALID_INPUT);

        let request = anyhow::Error::new(RequestError::EmptyTitle(1)).context("while loading");
        assert_eq!(exit_code(&request), EXIT_INVALID_INPUT);

        let other = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code(&other), 1);
    }
}
