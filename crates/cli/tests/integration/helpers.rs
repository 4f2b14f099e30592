//! Test helper utilities for CLI integration tests.

#![allow(deprecated)] // Command::cargo_bin deprecation

use assert_cmd::Command;

/// Create a CLI command with no `LENDRATE_*` variables leaking in from the environment.
pub fn lendrate_cmd() -> Command {
    let mut cmd = Command::cargo_bin("lendrate").unwrap();
    for var in [
        "LENDRATE_MODEL",
        "LENDRATE_KIND",
        "LENDRATE_BASE_RATE",
        "LENDRATE_MULTIPLIER",
        "LENDRATE_JUMP_MULTIPLIER",
        "LENDRATE_KINK",
        "LENDRATE_BLOCKS_PER_YEAR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Absolute path of a fixture file.
pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}.json", env!("CARGO_MANIFEST_DIR"), name)
}

/// Run a command and parse its stdout as JSON.
pub fn run_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}
