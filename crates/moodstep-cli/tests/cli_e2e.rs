//! CLI end-to-end tests.
//!
//! Each test runs the built binary with HOME pointed at a temp directory so
//! the user's real config is never touched.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_moodstep"))
        .args(args)
        .env("HOME", home)
        .env_remove("MOODSTEP_ENV")
        .output()
        .expect("failed to execute moodstep");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "moodstep {args:?} failed: {stderr}");
    stdout
}

const SNAPSHOT: &str = r#"{
  "tasks": [
    {
      "id": "t-1",
      "title": "Clean kitchen",
      "category": "Home",
      "priority": "medium",
      "scheduled_time": "2024-05-15T09:00:00Z",
      "created_at": "2024-05-14T09:00:00Z"
    }
  ],
  "priority_habit": {
    "id": "p-1",
    "name": "Reading",
    "category": "Learning",
    "days_per_week": 4,
    "created_at": "2024-05-01T09:00:00Z"
  },
  "priority_events": [
    { "id": "e-1", "habit_id": "p-1", "date": "2024-05-13T18:00:00Z", "completed": true },
    { "id": "e-2", "habit_id": "p-1", "date": "2024-05-14T18:00:00Z", "completed": false },
    { "id": "e-3", "habit_id": "p-1", "date": null, "completed": true }
  ],
  "mood_entries": [
    { "id": "m-1", "mood": "tired", "energy": "low", "stress": "high", "timestamp": "2024-05-14T20:00:00Z" },
    { "id": "m-2", "mood": "good", "energy": "high", "stress": "low", "timestamp": "2024-05-15T08:00:00Z" }
  ]
}"#;

fn write_snapshot(dir: &TempDir) -> String {
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_resolve_prints_literal_action() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["resolve", "Go to gym", "-w", "low", "-m", "tired"]);
    assert_eq!(out.trim(), "Put on your gym shoes and take 3 deep breaths");
}

#[test]
fn test_checkin_then_complete_task() {
    let home = TempDir::new().unwrap();
    let snapshot = write_snapshot(&home);
    let now = "2024-05-15T10:00:00+00:00";

    let out = run_cli_success(
        home.path(),
        &["checkin", "-s", &snapshot, "--now", now, "t-1", "-w", "medium", "-m", "stressed"],
    );
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value["record"]["resolved_action"],
        "Clear and wipe down just the counter"
    );

    let updated = home.path().join("updated.json");
    std::fs::write(&updated, value["snapshot"].to_string()).unwrap();
    let out = run_cli_success(
        home.path(),
        &["complete-task", "-s", updated.to_str().unwrap(), "--now", now, "t-1", "-m", "good"],
    );
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["completion"]["initial_mood"], "stressed");
    assert_eq!(value["snapshot"]["tasks"][0]["completed"], true);
}

#[test]
fn test_stats_weekly_counts_completed_events() {
    let home = TempDir::new().unwrap();
    let snapshot = write_snapshot(&home);
    let out = run_cli_success(
        home.path(),
        &["stats", "weekly", "-s", &snapshot, "--now", "2024-05-15T10:00:00+00:00"],
    );
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["completed_count"], 1);
    assert_eq!(value["target"], 4);
    assert_eq!(value["remaining"], 3);
}

#[test]
fn test_stats_trend_reports_journal_average() {
    let home = TempDir::new().unwrap();
    let snapshot = write_snapshot(&home);
    let out = run_cli_success(home.path(), &["stats", "trend", "-s", &snapshot]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["sample_count"], 0);
    assert_eq!(value["journal_average"], 3.5);
}

#[test]
fn test_unknown_task_fails_with_error_message() {
    let home = TempDir::new().unwrap();
    let snapshot = write_snapshot(&home);
    let (_, stderr, code) = run_cli(
        home.path(),
        &["complete-task", "-s", &snapshot, "missing", "-m", "good"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_set_get_and_reset() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["config", "set", "week.starts_on", "monday"]);
    let out = run_cli_success(home.path(), &["config", "get", "week.starts_on"]);
    assert_eq!(out.trim(), "monday");

    run_cli_success(home.path(), &["config", "reset"]);
    let out = run_cli_success(home.path(), &["config", "get", "week.starts_on"]);
    assert_eq!(out.trim(), "sunday");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "week.nope"]);
    assert_eq!(code, 1);
}
