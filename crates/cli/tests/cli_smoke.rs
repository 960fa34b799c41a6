//! CLI smoke tests for candysync.
//!
//! These tests verify that the CLI surface parses and reports errors with
//! the right exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the candysync binary.
fn candysync_cmd() -> Command {
  cargo_bin_cmd!("candysync")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  candysync_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  candysync_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("candysync"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["update", "diff", "pending"] {
    candysync_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

#[test]
fn update_help_shows_defaults() {
  candysync_cmd()
    .args(["update", "--help"])
    .assert()
    .success()
    .stdout(predicate::str::contains("[default: 10]"))
    .stdout(predicate::str::contains("[default: 500ms]"))
    .stdout(predicate::str::contains("[default: 1m]"));
}

#[test]
fn missing_subcommand_fails() {
  candysync_cmd().assert().failure();
}

// =============================================================================
// Input errors
// =============================================================================

#[test]
fn missing_ledger_file_fails() {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("cache.json"), r#"{"items":{}}"#).unwrap();

  candysync_cmd()
    .arg("pending")
    .arg("--ledger")
    .arg(temp.path().join("nope.json"))
    .arg("--collection")
    .arg("cm")
    .arg("--cache")
    .arg(temp.path().join("cache.json"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load ledger fixture"));
}

#[test]
fn invalid_cache_fails() {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("ledger.json"), "{}").unwrap();
  std::fs::write(temp.path().join("cache.json"), r#"{"items":{"0":{"link":"a"},"5":{"link":"b"}}}"#).unwrap();

  candysync_cmd()
    .arg("pending")
    .arg("--ledger")
    .arg(temp.path().join("ledger.json"))
    .arg("--collection")
    .arg("cm")
    .arg("--cache")
    .arg(temp.path().join("cache.json"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("index 1 is absent"));
}
