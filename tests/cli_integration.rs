//! CLI integration tests for taskplan
//!
//! These tests run the binary against request files in a temporary
//! directory and check both text and JSON output.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command instance for the taskplan binary
fn taskplan_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("taskplan"));
    cmd.env_remove("TASKPLAN_CONFIG").env_remove("TASKPLAN_LOG");
    cmd
}

const SCENARIO: &str = r#"{
  "tasks": [
    {"title": "A", "estimatedHours": 5, "dueDate": "2025-11-25", "priority": 5},
    {"title": "B", "estimatedHours": 12, "dueDate": "2025-11-28", "dependencies": ["A"], "priority": 4},
    {"title": "C", "estimatedHours": 10, "dueDate": "2025-11-30", "dependencies": ["A"], "priority": 3},
    {"title": "D", "estimatedHours": 8, "dueDate": "2025-12-01", "dependencies": ["B", "C"], "priority": 5}
  ]
}"#;

/// Write a request file into a fresh temp dir
fn setup_request(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = taskplan_cmd()
        .current_dir(dir.path())
        .args(args)
        .args(["--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).unwrap()
}

// =============================================================================
// Schedule
// =============================================================================

#[test]
fn test_schedule_scenario_json() {
    let (dir, path) = setup_request("plan.json", SCENARIO);

    let json = run_json(
        &dir,
        &["schedule", path.to_str().unwrap(), "--start", "2025-11-17"],
    );

    assert_eq!(json["recommendedOrder"], serde_json::json!(["A", "B", "C", "D"]));
    assert_eq!(json["warnings"], serde_json::json!([]));

    let schedule = json["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 4);
    assert_eq!(schedule[0]["suggestedStart"], "2025-11-17");
    assert_eq!(schedule[0]["suggestedEnd"], "2025-11-18");
    assert_eq!(schedule[2]["title"], "C");
    assert_eq!(schedule[2]["suggestedEnd"], "2025-11-24");
    assert_eq!(schedule[2]["isCriticalPath"], false);
    assert_eq!(schedule[3]["orderIndex"], 4);
    assert_eq!(schedule[3]["isCriticalPath"], true);

    let metrics = &json["metrics"];
    assert_eq!(metrics["projectStart"], "2025-11-17");
    assert_eq!(metrics["projectEnd"], "2025-11-25");
    assert_eq!(metrics["totalHours"], 35.0);
    assert_eq!(metrics["totalTasks"], 4);
    assert_eq!(metrics["criticalPathLength"], 25.0);
}

#[test]
fn test_schedule_text_output() {
    let (dir, path) = setup_request("plan.json", SCENARIO);

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["schedule", path.to_str().unwrap(), "--start", "2025-11-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommended order: A -> B -> C -> D"))
        .stdout(predicate::str::contains("2025-11-24"))
        .stdout(predicate::str::contains("Critical path: 25h"))
        .stdout(predicate::str::contains("Warnings").not());
}

#[test]
fn test_schedule_reports_deadline_warnings() {
    let (dir, path) = setup_request("plan.json", SCENARIO);

    let json = run_json(
        &dir,
        &["schedule", path.to_str().unwrap(), "--start", "2025-11-24"],
    );

    assert_eq!(
        json["warnings"],
        serde_json::json!([
            "Task 'C' may miss deadline. Estimated completion: 2025-12-01, Due: 2025-11-30",
            "Task 'D' may miss deadline. Estimated completion: 2025-12-02, Due: 2025-12-01"
        ])
    );
}

#[test]
fn test_schedule_from_stdin() {
    let dir = TempDir::new().unwrap();

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["schedule", "-", "--start", "2025-11-17", "--format", "json"])
        .write_stdin(SCENARIO)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"recommendedOrder\":[\"A\",\"B\",\"C\",\"D\"]"));
}

#[test]
fn test_schedule_yaml_request() {
    let yaml = r#"
- title: Write docs
  estimatedHours: 4
  dueDate: 2025-12-31
- title: Publish
  estimatedHours: 1
  dueDate: 2025-12-31
  dependencies: [Write docs]
"#;
    let (dir, path) = setup_request("plan.yaml", yaml);

    let json = run_json(
        &dir,
        &["schedule", path.to_str().unwrap(), "--start", "2025-11-17"],
    );
    assert_eq!(json["recommendedOrder"], serde_json::json!(["Write docs", "Publish"]));
}

#[test]
fn test_schedule_hours_per_day_flag() {
    let (dir, path) = setup_request(
        "plan.json",
        r#"[{"title": "Long", "estimatedHours": 12, "dueDate": "2025-12-31"}]"#,
    );

    let json = run_json(
        &dir,
        &[
            "schedule",
            path.to_str().unwrap(),
            "--start",
            "2025-11-17",
            "--hours-per-day",
            "4",
        ],
    );
    assert_eq!(json["schedule"][0]["suggestedEnd"], "2025-11-20");
}

#[test]
fn test_schedule_uses_local_config() {
    let (dir, path) = setup_request(
        "plan.json",
        r#"[{"title": "Long", "estimatedHours": 12, "dueDate": "2025-12-31"}]"#,
    );
    fs::write(
        dir.path().join("taskplan.toml"),
        "default_format = \"json\"\n[calendar]\nhours_per_day = 12.0\n",
    )
    .unwrap();

    let output = taskplan_cmd()
        .current_dir(dir.path())
        .args(["schedule", path.to_str().unwrap(), "--start", "2025-11-17"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["schedule"][0]["suggestedEnd"], "2025-11-18");
}

// =============================================================================
// Validation failures
// =============================================================================

#[test]
fn test_duplicate_title_rejected() {
    let (dir, path) = setup_request(
        "plan.json",
        r#"[
            {"title": "A", "estimatedHours": 1, "dueDate": "2025-11-25"},
            {"title": "A", "estimatedHours": 2, "dueDate": "2025-11-26"}
        ]"#,
    );

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["schedule", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Duplicate task title 'A'"));
}

#[test]
fn test_unknown_dependency_rejected() {
    let (dir, path) = setup_request(
        "plan.json",
        r#"[{"title": "A", "estimatedHours": 1, "dueDate": "2025-11-25", "dependencies": ["Ghost"]}]"#,
    );

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["order", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Task 'A' has invalid dependency: 'Ghost'"));
}

#[test]
fn test_cycle_rejected() {
    let (dir, path) = setup_request(
        "plan.json",
        r#"[
            {"title": "A", "estimatedHours": 1, "dueDate": "2025-11-25", "dependencies": ["B"]},
            {"title": "B", "estimatedHours": 1, "dueDate": "2025-11-25", "dependencies": ["A"]}
        ]"#,
    );

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Circular dependency detected"));
}

#[test]
fn test_hours_out_of_range_rejected() {
    let (dir, path) = setup_request(
        "plan.json",
        r#"[{"title": "A", "estimatedHours": 0.1, "dueDate": "2025-11-25"}]"#,
    );

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["schedule", path.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("estimatedHours"));
}

#[test]
fn test_missing_request_file() {
    let dir = TempDir::new().unwrap();

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["schedule", "nope.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read request"));
}

#[test]
fn test_task_limit_from_config() {
    let (dir, path) = setup_request("plan.json", SCENARIO);
    let config = dir.path().join("strict.toml");
    fs::write(&config, "[limits]\nmax_tasks = 2\n").unwrap();

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["schedule", path.to_str().unwrap(), "--config", config.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at most 2 are allowed"));
}

#[test]
fn test_invalid_config_is_general_failure() {
    let (dir, path) = setup_request("plan.json", SCENARIO);
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[calendar]\nhours_per_day = 0.0\n").unwrap();

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["schedule", path.to_str().unwrap(), "--config", config.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("hours_per_day"));
}

// =============================================================================
// Other commands
// =============================================================================

#[test]
fn test_validate_ok() {
    let (dir, path) = setup_request("plan.json", SCENARIO);

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["validate", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Request is valid: 4 tasks"));
}

#[test]
fn test_order_text() {
    let (dir, path) = setup_request("plan.json", SCENARIO);

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["order", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. A"))
        .stdout(predicate::str::contains("4. D"));
}

#[test]
fn test_critical_json() {
    let (dir, path) = setup_request("plan.json", SCENARIO);

    let json = run_json(&dir, &["critical", path.to_str().unwrap()]);

    assert_eq!(json["projectDuration"], 25.0);
    assert_eq!(json["criticalPathLength"], 25.0);
    assert_eq!(json["criticalTasks"], serde_json::json!(["A", "B", "D"]));

    let timings = json["timings"].as_array().unwrap();
    assert_eq!(timings[2]["title"], "C");
    assert_eq!(timings[2]["earliestStart"], 5.0);
    assert_eq!(timings[2]["latestStart"], 7.0);
    assert_eq!(timings[2]["slack"], 2.0);
}

#[test]
fn test_sample_round_trips_through_schedule() {
    let dir = TempDir::new().unwrap();

    let output = taskplan_cmd()
        .current_dir(dir.path())
        .args(["sample", "--from", "2025-11-17"])
        .assert()
        .success();
    let sample = output.get_output().stdout.clone();
    fs::write(dir.path().join("sample.json"), &sample).unwrap();

    let json = run_json(&dir, &["schedule", "sample.json", "--start", "2025-11-17"]);
    assert_eq!(json["recommendedOrder"][0], "Design API");
    assert_eq!(json["metrics"]["criticalPathLength"], 25.0);
}

#[test]
fn test_config_shows_defaults() {
    let dir = TempDir::new().unwrap();

    taskplan_cmd()
        .current_dir(dir.path())
        .args(["config", "--config", "missing.toml"])
        .assert()
        .failure();

    fs::write(dir.path().join("taskplan.toml"), "[limits]\nmax_tasks = 7\n").unwrap();
    taskplan_cmd()
        .current_dir(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_tasks = 7"))
        .stdout(predicate::str::contains("hours_per_day = 8.0"));
}
