//! Corruption recovery tests for liftlog.
//!
//! These tests verify the system can handle:
//! - Corrupted record and exercise files
//! - Missing files
//! - Data written by the browser version of the log

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liftlog"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

fn setup_test_dir() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    temp_dir
}

#[test]
fn test_missing_data_is_empty() {
    let temp_dir = setup_test_dir();

    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No training records found."));

    cli(&temp_dir)
        .args(["exercise", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved exercises."));
}

#[test]
fn test_corrupted_records_file() {
    let temp_dir = setup_test_dir();
    let records_path = temp_dir.path().join("data/trainingRecords.json");
    fs::write(&records_path, "{ invalid json }}}}").expect("Failed to write corrupted records");

    // Load falls back to empty and reports it on stderr
    cli(&temp_dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No training records found."))
        .stderr(predicate::str::contains("trainingRecords"));
}

#[test]
fn test_logging_after_corruption_overwrites_file() {
    let temp_dir = setup_test_dir();
    let records_path = temp_dir.path().join("data/trainingRecords.json");
    fs::write(&records_path, "[{\"id\": ").unwrap();

    cli(&temp_dir)
        .args(["exercise", "add", "Lunge", "--pattern", "lower_push"])
        .assert()
        .success();
    cli(&temp_dir)
        .args(["log", "-e", "Lunge", "--date", "2024-01-15", "30x12!"])
        .assert()
        .success();

    let contents = fs::read_to_string(&records_path).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&contents).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["exercise"]["name"], "Lunge");
}

#[test]
fn test_corrupted_exercises_file() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("data/savedExercises.json"), "not json").unwrap();

    cli(&temp_dir)
        .args(["exercise", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved exercises."));
}

#[test]
fn test_empty_records_file() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("data/trainingRecords.json"), "").unwrap();

    cli(&temp_dir).arg("progress").assert().success();
}

#[test]
fn test_legacy_browser_export_loads() {
    let temp_dir = setup_test_dir();
    let legacy = r#"[
        {
            "id": "1705312800000",
            "date": "2024-01-15",
            "exercise": { "id": "1705000000000", "name": "Pull-up", "pattern": "上肢垂直拉" },
            "sets": [
                { "weight": 10, "reps": 8, "isNearFailure": true },
                { "weight": 10, "reps": 7, "isNearFailure": true }
            ],
            "createdAt": "2024-01-15T10:00:00.000Z"
        }
    ]"#;
    fs::write(temp_dir.path().join("data/trainingRecords.json"), legacy).unwrap();

    cli(&temp_dir)
        .args(["history", "--pattern", "upper_vertical_pull"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pull-up"))
        .stdout(predicate::str::contains("10kg×8 (near failure)"));
}
