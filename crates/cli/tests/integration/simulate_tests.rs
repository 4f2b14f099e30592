//! Tests for the `simulate` command.

use predicates::prelude::*;

use super::helpers::{fixture_path, lendrate_cmd, run_json};

#[test]
fn test_idle_market_drives_multiplier_to_zero() {
    let json = run_json(lendrate_cmd().args([
        "--format",
        "json",
        "simulate",
        "--cash",
        "1000",
        "--borrows",
        "0",
        "--accruals",
        "10",
        "--model",
        &fixture_path("reactive"),
    ]));

    let steps = json.as_array().unwrap();
    assert_eq!(steps.len(), 10);
    assert_eq!(steps[0]["checkpoints"], 1);
    assert_eq!(steps[7]["checkpoints"], 8);
    // The history is capped at eight checkpoints
    assert_eq!(steps[9]["checkpoints"], 8);
    assert!(steps[0]["multiplier_apr"].as_f64().unwrap() > 0.0);
    assert_eq!(steps[9]["multiplier_apr"].as_f64().unwrap(), 0.0);
    assert_eq!(steps[9]["block_number"], 10);
}

#[test]
fn test_block_spacing() {
    let json = run_json(lendrate_cmd().args([
        "--format",
        "json",
        "simulate",
        "--cash",
        "690",
        "--borrows",
        "310",
        "--blocks",
        "100",
        "--accruals",
        "3",
        "--model",
        &fixture_path("jump"),
    ]));

    let steps = json.as_array().unwrap();
    assert_eq!(steps[2]["block_number"], 300);
    // Stateless models do not keep checkpoints
    assert!(steps[0].get("checkpoints").is_none());
    let first = steps[0]["borrow_index"].as_f64().unwrap();
    let last = steps[2]["borrow_index"].as_f64().unwrap();
    assert!(first > 1.0);
    assert!(last > first);
}

#[test]
fn test_simulate_table_output() {
    lendrate_cmd()
        .args([
            "simulate",
            "--cash",
            "500",
            "--borrows",
            "500",
            "--accruals",
            "2",
            "--model",
            &fixture_path("reactive"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Multiplier"))
        .stdout(predicate::str::contains("Checkpoints"))
        .stdout(predicate::str::contains("Borrow Index"));
}

#[test]
fn test_zero_block_spacing_rejected() {
    lendrate_cmd()
        .args([
            "simulate",
            "--cash",
            "1",
            "--borrows",
            "1",
            "--blocks",
            "0",
            "--model",
            &fixture_path("jump"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--blocks must be at least 1"));
}
