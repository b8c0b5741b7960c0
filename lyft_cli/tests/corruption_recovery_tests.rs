//! Corruption handling tests for the lyft binary.
//!
//! The ledger is the only copy of the workout log, so a damaged file must
//! never be replaced or "repaired" by a command:
//! - Corrupted ledger JSON
//! - Truncated writes
//! - Hand-edited summary rows

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lyft"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_ledger_is_not_overwritten() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let ledger_path = data_dir.join("ledger.json");
    fs::write(&ledger_path, "{ invalid json }}}}").expect("Failed to write corrupted ledger");

    cli(data_dir)
        .args(["add", "--date", "2021-03-01", "--exercise", "Cable Flys"])
        .args(["--set", "12x15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));

    cli(data_dir).arg("recompute").assert().failure();

    assert_eq!(
        fs::read_to_string(&ledger_path).unwrap(),
        "{ invalid json }}}}"
    );
}

#[test]
fn test_truncated_ledger_is_an_error() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["add", "--date", "2021-03-01", "--exercise", "Cable Flys"])
        .args(["--set", "12x15"])
        .assert()
        .success();

    let ledger_path = data_dir.join("ledger.json");
    let contents = fs::read_to_string(&ledger_path).unwrap();
    let truncated = &contents[..contents.len() / 2];
    fs::write(&ledger_path, truncated).unwrap();

    cli(data_dir)
        .args(["summary", "--date", "2021-03-01"])
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&ledger_path).unwrap(), truncated);
}

#[test]
fn test_missing_ledger_starts_empty() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("not").join("yet").join("created");

    cli(&data_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("No summary rows yet"));

    cli(&data_dir)
        .args(["add", "--date", "2021-03-01", "--exercise", "Cable Flys"])
        .args(["--set", "12x15"])
        .assert()
        .success();
    assert!(data_dir.join("ledger.json").exists());
}

#[test]
fn test_recompute_repairs_edited_summary() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["add", "--date", "2021-03-01", "--exercise", "Cable Flys"])
        .args(["--set", "12x15", "--set", "12x15"])
        .assert()
        .success();

    // Inflate the stored row by hand
    let ledger_path = data_dir.join("ledger.json");
    let mut ledger: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&ledger_path).unwrap()).unwrap();
    ledger["summary"]["2021-W09"]["pectorals"] = serde_json::json!(99.0);
    fs::write(&ledger_path, serde_json::to_string(&ledger).unwrap()).unwrap();

    cli(data_dir)
        .args(["summary", "--week", "2021-W09"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Pectorals\s+99\.00").unwrap());

    cli(data_dir).arg("recompute").assert().success();

    cli(data_dir)
        .args(["summary", "--week", "2021-W09"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Pectorals\s+2\.00").unwrap());
}

#[test]
fn test_incomplete_summary_row_is_rejected() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let ledger_path = data_dir.join("ledger.json");
    fs::write(
        &ledger_path,
        r#"{"log": [], "summary": {"2021-W09": {"pectorals": 1.0}}}"#,
    )
    .unwrap();

    cli(data_dir)
        .args(["summary", "--week", "2021-W09"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn test_misnamed_log_key_is_not_overwritten() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let ledger_path = data_dir.join("ledger.json");
    let contents = r#"{"logs": [{"date": "2021-03-01", "exercise": "Cable Flys", "set_index": 1, "reps": 12, "weight": 15.0}], "summary": {}}"#;
    fs::write(&ledger_path, contents).unwrap();

    cli(data_dir)
        .args(["add", "--date", "2021-03-02", "--exercise", "Cable Flys"])
        .args(["--set", "12x15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));

    cli(data_dir)
        .arg("recompute")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));

    assert_eq!(fs::read_to_string(&ledger_path).unwrap(), contents);
}
