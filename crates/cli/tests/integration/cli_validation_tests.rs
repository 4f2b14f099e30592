//! CLI argument validation tests.
//!
//! These tests verify that the CLI properly validates arguments and provides
//! helpful error messages.

use predicates::prelude::*;

use super::helpers::{fixture_path, lendrate_cmd};

#[test]
fn test_help_output() {
    lendrate_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lendrate"))
        .stdout(predicate::str::contains("rates"))
        .stdout(predicate::str::contains("curve"))
        .stdout(predicate::str::contains("simulate"));
}

#[test]
fn test_rates_help_lists_model_flags() {
    lendrate_cmd()
        .args(["rates", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cash"))
        .stdout(predicate::str::contains("--kind"))
        .stdout(predicate::str::contains("--jump"))
        .stdout(predicate::str::contains("LENDRATE_KINK"));
}

#[test]
fn test_invalid_command() {
    lendrate_cmd()
        .arg("invalid_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_rates_missing_cash() {
    lendrate_cmd()
        .args(["rates", "--borrows", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_unknown_model_kind() {
    lendrate_cmd()
        .args(["rates", "--cash", "1", "--borrows", "1", "--kind", "harnessed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown model kind"));
}

#[test]
fn test_invalid_decimal() {
    lendrate_cmd()
        .args(["rates", "--cash", "lots", "--borrows", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_format() {
    lendrate_cmd()
        .args(["--format", "xml", "curve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_reserve_factor_out_of_range() {
    lendrate_cmd()
        .args([
            "rates",
            "--cash",
            "1",
            "--borrows",
            "1",
            "--reserve-factor",
            "1.5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserve_factor must be between 0 and 1"));
}

#[test]
fn test_missing_model_file() {
    lendrate_cmd()
        .args(["curve", "--model", "/nonexistent/model.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load rate model"));
}

#[test]
fn test_zero_curve_step() {
    lendrate_cmd()
        .args(["curve", "--step", "0", "--model", &fixture_path("jump")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step must be greater than zero"));
}

#[test]
fn test_model_from_env() {
    lendrate_cmd()
        .env("LENDRATE_MODEL", fixture_path("jump"))
        .args(["--format", "json", "rates", "--cash", "690", "--borrows", "310"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"jump-rate\""));
}
