//! taskplan - dependency-aware task scheduling
//!
//! Given tasks with effort estimates, due dates, priorities and dependencies,
//! taskplan produces a deterministic execution order, a working-day calendar
//! projection, the critical path, and deadline warnings.
//!
//! ```no_run
//! use taskplan::domain::{generate_schedule, ScheduleOptions};
//! use taskplan::storage::{load_request, LimitsConfig};
//!
//! let request = load_request("plan.json", &LimitsConfig::default())?;
//! let result = generate_schedule(&request.tasks, &ScheduleOptions::starting_today())?;
//! println!("{}", result.recommended_order.join(" -> "));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod domain;
pub mod storage;
pub mod logging;
pub mod cli;

pub use domain::{
    generate_schedule, InvalidSchedule, ScheduleOptions, ScheduleResult, ScheduledTask, TaskInput,
};
