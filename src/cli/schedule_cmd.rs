//! Scheduling commands (schedule, order, critical, validate, sample)

use anyhow::{bail, Result};
use chrono::{Days, Local, NaiveDate};

use super::output::Output;
use crate::domain::{self, ScheduleOptions, TaskInput, WorkCalendar};
use crate::storage::{load_request, Config, TaskScheduleRequest};

/// Build and print a full schedule
pub fn schedule(
    output: &Output,
    config: &Config,
    input: &str,
    start: Option<NaiveDate>,
    hours_per_day: Option<f64>,
) -> Result<()> {
    let calendar = match hours_per_day {
        Some(hours) if !(hours > 0.0 && hours <= 24.0) => {
            bail!("--hours-per-day must be in (0, 24], got {}", hours)
        }
        Some(hours) => WorkCalendar::new(hours),
        None => config.calendar.calendar(),
    };

    let request = load_request(input, &config.limits)?;
    output.verbose_ctx("schedule", &format!("Loaded {} tasks", request.tasks.len()));

    let options = start
        .map(ScheduleOptions::new)
        .unwrap_or_else(ScheduleOptions::starting_today)
        .with_calendar(calendar);
    output.verbose_ctx(
        "schedule",
        &format!(
            "Projecting from {} at {}h/day",
            options.start_date,
            options.calendar.hours_per_day()
        ),
    );

    let result = domain::generate_schedule(&request.tasks, &options)?;

    if output.is_json() {
        output.data(&result);
        return Ok(());
    }

    if result.schedule.is_empty() {
        println!("No tasks to schedule.");
        return Ok(());
    }

    println!("Recommended order: {}", result.recommended_order.join(" -> "));
    println!();
    println!(
        "{:<4} {:<28} {:<11} {:<11} {:>7}  CRITICAL",
        "#", "TITLE", "START", "END", "HOURS"
    );
    println!("{}", "-".repeat(74));
    for task in &result.schedule {
        println!(
            "{:<4} {:<28} {:<11} {:<11} {:>7}  {}",
            task.order_index,
            task.title,
            task.suggested_start.format("%Y-%m-%d"),
            task.suggested_end.format("%Y-%m-%d"),
            task.estimated_hours,
            if task.is_critical_path { "yes" } else { "" }
        );
    }

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings ({}):", result.warnings.len());
        for warning in &result.warnings {
            println!("  ! {}", warning);
        }
    }

    let metrics = &result.metrics;
    println!();
    println!(
        "Project:       {} -> {}",
        metrics.project_start.format("%Y-%m-%d"),
        metrics.project_end.format("%Y-%m-%d")
    );
    println!("Total:         {}h over {} tasks", metrics.total_hours, metrics.total_tasks);
    println!("Critical path: {}h", metrics.critical_path_length);

    Ok(())
}

/// Print the recommended order only
pub fn order(output: &Output, config: &Config, input: &str) -> Result<()> {
    let request = load_request(input, &config.limits)?;
    let ordered = domain::recommended_order(&request.tasks)?;

    if output.is_json() {
        let titles: Vec<&str> = ordered.iter().map(|t| t.title.as_str()).collect();
        output.data(&serde_json::json!({ "recommendedOrder": titles }));
    } else if ordered.is_empty() {
        println!("No tasks to order.");
    } else {
        println!("Recommended order ({}):", ordered.len());
        for (i, task) in ordered.iter().enumerate() {
            println!("{:>4}. {}", i + 1, task.title);
        }
    }

    Ok(())
}

/// Print the critical path analysis
pub fn critical(output: &Output, config: &Config, input: &str) -> Result<()> {
    let request = load_request(input, &config.limits)?;
    let cp = domain::critical_path(&request.tasks)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "projectDuration": cp.project_duration,
            "criticalPathLength": cp.length(),
            "criticalTasks": cp.critical_titles(),
            "timings": cp.timings,
        }));
        return Ok(());
    }

    if cp.timings.is_empty() {
        println!("No tasks to analyse.");
        return Ok(());
    }

    println!(
        "{:<28} {:>7} {:>9} {:>9} {:>7}  CRITICAL",
        "TITLE", "HOURS", "EARLIEST", "LATEST", "SLACK"
    );
    println!("{}", "-".repeat(74));
    for timing in &cp.timings {
        println!(
            "{:<28} {:>7} {:>9} {:>9} {:>7}  {}",
            timing.title,
            timing.estimated_hours,
            timing.earliest_start,
            timing.latest_start,
            format!("{:.2}", timing.slack),
            if timing.critical { "yes" } else { "" }
        );
    }

    println!();
    println!("Project duration: {}h", cp.project_duration);
    println!("Critical path:    {} ({}h)", cp.critical_titles().join(" -> "), cp.length());

    Ok(())
}

/// Check a request without scheduling it
pub fn validate(output: &Output, config: &Config, input: &str) -> Result<()> {
    let request = load_request(input, &config.limits)?;
    domain::validate(&request.tasks)?;

    output.success(&format!("Request is valid: {} tasks", request.tasks.len()));
    Ok(())
}

/// Print a sample request
pub fn sample(output: &Output, from: Option<NaiveDate>) -> Result<()> {
    let base = from.unwrap_or_else(|| Local::now().date_naive());
    output.verbose_ctx("sample", &format!("Due dates relative to {}", base));

    // Pretty JSON in text mode, compact JSON in JSON mode
    output.data(&sample_request(base));
    Ok(())
}

/// Four-task design/build/test plan with due dates offset from `base`
pub fn sample_request(base: NaiveDate) -> TaskScheduleRequest {
    let due = |days: u64| {
        base.checked_add_days(Days::new(days))
            .unwrap_or(base)
            .and_time(chrono::NaiveTime::MIN)
    };

    TaskScheduleRequest {
        tasks: vec![
            TaskInput::new("Design API", 5.0, due(8)).with_priority(5),
            TaskInput::new("Implement Backend", 12.0, due(11))
                .depends_on("Design API")
                .with_priority(4),
            TaskInput::new("Build Frontend", 10.0, due(13))
                .depends_on("Design API")
                .with_priority(3),
            TaskInput::new("End-to-End Test", 8.0, due(14))
                .depends_on("Implement Backend")
                .depends_on("Build Frontend")
                .with_priority(5),
        ],
    }
}
