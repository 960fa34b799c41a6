//! Pending command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn pending_lists_unminted_indices() {
  let env = TestEnv::scenario();

  env
    .cmd("pending")
    .assert()
    .success()
    .stdout(predicate::str::contains("Pending: 12"))
    .stdout(predicate::str::contains("Unminted indices: 4, 5, 6"));
}

#[test]
fn pending_json() {
  let env = TestEnv::scenario();

  let output = env.cmd("pending").arg("--output").arg("json").assert().success();
  let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

  assert_eq!(json["item_count"], 16);
  assert_eq!(json["minted"], 4);
  assert_eq!(json["pending"][0], 4);
  assert_eq!(json["pending"].as_array().unwrap().len(), 12);
}

#[test]
fn pending_unknown_collection_fails() {
  let env = TestEnv::scenario();

  env
    .cmd_for("pending", "Missing")
    .assert()
    .failure()
    .stderr(predicate::str::contains("account not found"));
}
