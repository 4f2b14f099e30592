//! Tests for the `rates` and `curve` commands.

use predicates::prelude::*;

use super::helpers::{fixture_path, lendrate_cmd, run_json};

fn approx(value: &serde_json::Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-6
}

#[test]
fn test_rates_table_output() {
    lendrate_cmd()
        .args([
            "rates",
            "--cash",
            "690",
            "--borrows",
            "310",
            "--model",
            &fixture_path("jump"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("jump-rate"))
        .stdout(predicate::str::contains("Utilization: 31.0000%"))
        .stdout(predicate::str::contains("Borrow:      16.2000% APR"));
}

#[test]
fn test_rates_json_inline_flags() {
    let json = run_json(lendrate_cmd().args([
        "--format",
        "json",
        "rates",
        "--cash",
        "690",
        "--borrows",
        "310",
        "--reserve-factor",
        "0.1",
        "--kind",
        "jump-rate",
        "--base",
        "0.1",
        "--multiplier",
        "0.2",
        "--jump",
        "1",
        "--kink",
        "0.9",
    ]));

    assert_eq!(json["kind"], "jump-rate");
    assert!(approx(&json["borrow_apr"], 0.162));
    // 0.31 * 0.162 * 0.9
    assert!(approx(&json["supply_apr"], 0.045198));
}

#[test]
fn test_rates_white_paper_has_no_kink() {
    let json = run_json(lendrate_cmd().args([
        "--format",
        "json",
        "rates",
        "--cash",
        "50",
        "--borrows",
        "50",
        "--kind",
        "white-paper",
        "--base",
        "0.02",
        "--multiplier",
        "0.1",
    ]));

    assert_eq!(json["kind"], "white-paper");
    assert!(json.get("kink").is_none());
    assert!(approx(&json["borrow_apr"], 0.07));
}

#[test]
fn test_rates_empty_market() {
    let json = run_json(lendrate_cmd().args([
        "--format",
        "json",
        "rates",
        "--cash",
        "0",
        "--borrows",
        "0",
        "--model",
        &fixture_path("jump"),
    ]));

    assert!(approx(&json["borrow_apr"], 0.1));
    assert!(approx(&json["supply_apr"], 0.0));
}

#[test]
fn test_curve_json_marks_kink() {
    let json = run_json(lendrate_cmd().args([
        "--format",
        "json",
        "curve",
        "--step",
        "50",
        "--model",
        &fixture_path("jump"),
    ]));

    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["above_kink"], false);
    assert_eq!(points[1]["above_kink"], false);
    assert_eq!(points[2]["above_kink"], true);
    assert!(approx(&points[0]["borrow_apr"], 0.1));
    // 0.9 * 0.2 + 0.1 * 1 + 0.1
    assert!(approx(&points[2]["borrow_apr"], 0.38));
}

#[test]
fn test_curve_table_output() {
    lendrate_cmd()
        .args(["curve", "--step", "25", "--model", &fixture_path("jump")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Utilization"))
        .stdout(predicate::str::contains("75.00%"))
        .stdout(predicate::str::contains("jump"));
}

#[test]
fn test_curve_uneven_step_includes_full_utilization() {
    let json = run_json(lendrate_cmd().args([
        "--format",
        "json",
        "curve",
        "--step",
        "30",
        "--model",
        &fixture_path("jump"),
    ]));

    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 5);
    assert!(approx(&points[4]["borrow_apr"], 0.38));
    assert_eq!(points[4]["above_kink"], true);
}

#[test]
fn test_curve_reserve_factor_out_of_range() {
    lendrate_cmd()
        .args([
            "curve",
            "--reserve-factor",
            "1.5",
            "--model",
            &fixture_path("jump"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserve_factor must be between 0 and 1"));
}
