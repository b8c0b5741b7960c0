//! Concurrency tests for the lyft binary.
//!
//! These tests verify that multiple processes can safely:
//! - Log workouts into the same ledger simultaneously (file locking)
//! - Read summaries while others write
//! - Recompute while others append, without losing updates

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lyft"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Log one set of `exercise` on the `day`-th of March 2021
fn add_in_thread(data_dir: PathBuf, exercise: &'static str, day: u32) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        cli(&data_dir)
            .args(["add", "--date", &format!("2021-03-{:02}", day)])
            .args(["--exercise", exercise, "--set", "10x20"])
            .timeout(Duration::from_secs(10))
            .assert()
            .success();
    })
}

fn read_ledger(data_dir: &Path) -> serde_json::Value {
    let contents =
        std::fs::read_to_string(data_dir.join("ledger.json")).expect("Failed to read ledger");
    serde_json::from_str(&contents).expect("Ledger is not valid JSON")
}

#[test]
fn test_concurrent_adds_lose_no_updates() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Two exercises on each day of 2021-W09 (March 1..=7)
    let handles: Vec<_> = (1..=7)
        .flat_map(|day| {
            [
                add_in_thread(data_dir.clone(), "Cable Flys", day),
                add_in_thread(data_dir.clone(), "Leg Extensions", day),
            ]
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let ledger = read_ledger(&data_dir);
    assert_eq!(ledger["log"].as_array().unwrap().len(), 14);
    assert_eq!(ledger["summary"]["2021-W09"]["pectorals"], 7.0);
    assert_eq!(ledger["summary"]["2021-W09"]["quadriceps"], 7.0);
}

#[test]
fn test_same_exercise_appended_concurrently() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // Both processes log the same exercise on the same date; the lock
    // serializes them and the second is numbered after the first.
    let handles: Vec<_> = (0..2)
        .map(|_| add_in_thread(data_dir.clone(), "Cable Flys", 1))
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let ledger = read_ledger(&data_dir);
    let mut indices: Vec<u64> = ledger["log"]
        .as_array()
        .unwrap()
        .iter()
        .map(|set| set["set_index"].as_u64().unwrap())
        .collect();
    indices.sort();
    assert_eq!(indices, vec![1, 2]);
    assert_eq!(ledger["summary"]["2021-W09"]["pectorals"], 2.0);
}

#[test]
fn test_reads_and_recompute_during_writes() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli(&data_dir)
        .args(["add", "--date", "2021-03-01", "--exercise", "Cable Flys"])
        .args(["--set", "10x20"])
        .assert()
        .success();

    let writers: Vec<_> = (2..=6)
        .map(|day| add_in_thread(data_dir.clone(), "Cable Flys", day))
        .collect();

    let reader_dir = data_dir.clone();
    let reader = thread::spawn(move || {
        for i in 0..5 {
            thread::sleep(Duration::from_millis(i * 5));
            cli(&reader_dir)
                .args(["summary", "--week", "2021-W09"])
                .timeout(Duration::from_secs(10))
                .assert()
                .success()
                .stdout(predicate::str::contains("Pectorals"));
        }
    });

    let recompute_dir = data_dir.clone();
    let recompute = thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        cli(&recompute_dir)
            .arg("recompute")
            .timeout(Duration::from_secs(10))
            .assert()
            .success();
    });

    for handle in writers {
        handle.join().expect("Writer panicked");
    }
    reader.join().expect("Reader panicked");
    recompute.join().expect("Recompute panicked");

    let ledger = read_ledger(&data_dir);
    assert_eq!(ledger["log"].as_array().unwrap().len(), 6);
    assert_eq!(ledger["summary"]["2021-W09"]["pectorals"], 6.0);
}
