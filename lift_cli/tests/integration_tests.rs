//! Integration tests for the liftlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Exercise catalog management
//! - Set logging, set validation and the one-record-per-day-and-exercise rule
//! - History listing and deletion
//! - Progress, analysis and export output

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI, isolated from any real user config
fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liftlog"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(temp_dir.path().join("data"));
    cmd
}

fn read_records(temp_dir: &TempDir) -> Vec<serde_json::Value> {
    let path = temp_dir.path().join("data/trainingRecords.json");
    let contents = fs::read_to_string(path).expect("Failed to read records");
    serde_json::from_str(&contents).expect("Records are not a JSON array")
}

fn add_exercise(temp_dir: &TempDir, name: &str, pattern: &str) {
    cli(temp_dir)
        .args(["exercise", "add", name, "--pattern", pattern])
        .assert()
        .success();
}

fn log(temp_dir: &TempDir, exercise: &str, date: &str, sets: &[&str]) {
    cli(temp_dir)
        .args(["log", "--exercise", exercise, "--date", date])
        .args(sets)
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal strength-training log"));
}

#[test]
fn test_exercise_add_and_list() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Back Squat", "lower_push");
    add_exercise(&temp_dir, "Pull-up", "uvl");

    cli(&temp_dir)
        .args(["exercise", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Back Squat"))
        .stdout(predicate::str::contains("Upper vertical pull"));

    let saved = fs::read_to_string(temp_dir.path().join("data/savedExercises.json")).unwrap();
    assert!(saved.contains("\"pattern\":\"upper_vertical_pull\""));
}

#[test]
fn test_exercise_add_rejects_unknown_pattern() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .args(["exercise", "add", "Curl", "--pattern", "biceps"])
        .assert()
        .failure();
}

#[test]
fn test_log_writes_record() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Back Squat", "lower_push");

    cli(&temp_dir)
        .args(["log", "-e", "back squat", "--date", "2024-01-15", "100x5", "105x3!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Back Squat on 2024-01-15"));

    let records = read_records(&temp_dir);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["date"], "2024-01-15");
    assert_eq!(records[0]["sets"].as_array().unwrap().len(), 2);
    assert_eq!(records[0]["sets"][1]["isNearFailure"], true);
}

#[test]
fn test_log_same_day_appends_sets() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Bench Press", "upper_horizontal_push");

    log(&temp_dir, "Bench Press", "2024-01-15", &["85x6!", "85x5!", "85x5!"]);
    let first_id = read_records(&temp_dir)[0]["id"].clone();

    cli(&temp_dir)
        .args(["log", "-e", "Bench Press", "--date", "2024-01-15", "70x10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added to 3 set(s) already logged"));

    let records = read_records(&temp_dir);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], first_id);

    let sets = records[0]["sets"].as_array().unwrap();
    assert_eq!(sets.len(), 4);
    assert_eq!(sets[0]["isNearFailure"], true);
    assert_eq!(sets[3]["reps"], 10);
}

#[test]
fn test_log_invalid_set_saves_nothing() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Back Squat", "lower_push");

    cli(&temp_dir)
        .args(["log", "-e", "Back Squat", "--date", "2024-01-15", "100x5", "100x0"])
        .assert()
        .failure();

    assert!(!temp_dir.path().join("data/trainingRecords.json").exists());
}

#[test]
fn test_log_rejects_infinite_weight_and_keeps_history() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Back Squat", "lower_push");
    log(&temp_dir, "Back Squat", "2024-01-01", &["100x5"]);

    for weight in ["infx5", "1e400x5"] {
        cli(&temp_dir)
            .args(["log", "-e", "Back Squat", "--date", "2024-01-02", weight])
            .assert()
            .failure();
    }
    log(&temp_dir, "Back Squat", "2024-01-03", &["110x5"]);

    let records = read_records(&temp_dir);
    let dates: Vec<&str> = records.iter().map(|r| r["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-03"]);
}

#[test]
fn test_log_unknown_exercise_fails() {
    let temp_dir = setup_test_dir();
    cli(&temp_dir)
        .args(["log", "-e", "Nonexistent", "--date", "2024-01-15", "100x5"])
        .assert()
        .failure();

    assert!(!temp_dir.path().join("data/trainingRecords.json").exists());
}

#[test]
fn test_log_rejects_zero_weight() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Dip", "uvp");

    cli(&temp_dir)
        .args(["log", "-e", "Dip", "--date", "2024-01-15", "0x10"])
        .assert()
        .failure();
}

#[test]
fn test_history_filters_and_delete() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Deadlift", "lower_pull");
    add_exercise(&temp_dir, "Row", "upper_horizontal_pull");

    log(&temp_dir, "Deadlift", "2024-02-01", &["140x5!"]);
    log(&temp_dir, "Row", "2024-02-02", &["70x10"]);
    log(&temp_dir, "Deadlift", "2024-02-08", &["145x5!"]);

    cli(&temp_dir)
        .args(["history", "--pattern", "lower_pull"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-08  Deadlift"))
        .stdout(predicate::str::contains("Row").not());

    let ids: Vec<String> = read_records(&temp_dir)
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();

    cli(&temp_dir)
        .args(["delete", ids[0].as_str(), ids[1].as_str(), "not-a-real-id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 record(s)"));

    let remaining = read_records(&temp_dir);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], ids[2].as_str());
}

#[test]
fn test_delete_missing_id_keeps_records() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Deadlift", "lower_pull");
    log(&temp_dir, "Deadlift", "2024-02-01", &["140x5"]);

    cli(&temp_dir)
        .args(["delete", "missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 0 record(s)"));

    assert_eq!(read_records(&temp_dir).len(), 1);
}

#[test]
fn test_progress_counts_near_failure_sets() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Back Squat", "lower_push");
    log(&temp_dir, "Back Squat", "2024-01-14", &["100x5!", "100x5!", "90x8"]);

    cli(&temp_dir)
        .args(["progress", "--date", "2024-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2/10"))
        .stdout(predicate::str::contains("8 to go"));
}

#[test]
fn test_analyze_sets_and_max() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Back Squat", "lower_push");
    log(&temp_dir, "Back Squat", "2024-01-14", &["110x3!"]);
    log(&temp_dir, "Back Squat", "2024-01-01", &["100x5!"]);

    cli(&temp_dir)
        .args(["analyze", "--date", "2024-01-15", "--weeks", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lower push"))
        .stdout(predicate::str::contains("1/8-1/15"));

    cli(&temp_dir)
        .args(["analyze", "--metric", "max", "--date", "2024-01-15", "--weeks", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Back Squat"))
        .stdout(predicate::str::contains("+10.0%"));
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    add_exercise(&temp_dir, "Overhead Press", "upper_vertical_push");
    log(&temp_dir, "Overhead Press", "2024-03-01", &["40x8", "42.5x6!"]);

    let out = temp_dir.path().join("export.csv");
    cli(&temp_dir)
        .arg("export")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 sets"));

    let csv = fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Overhead Press,upper_vertical_push"));
}
