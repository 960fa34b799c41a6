//! Diff command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn diff_shows_changed_minted_link() {
  let env = TestEnv::scenario();

  env
    .cmd("diff")
    .arg("--new-cache")
    .arg(&env.new_cache_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("Changed links: 1"))
    .stdout(predicate::str::contains("Records to update: 1"))
    .stdout(predicate::str::contains("meta2"));
}

#[test]
fn diff_json() {
  let env = TestEnv::scenario();

  let output = env
    .cmd("diff")
    .arg("--new-cache")
    .arg(&env.new_cache_path)
    .arg("--output")
    .arg("json")
    .assert()
    .success();
  let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

  assert_eq!(json["changed"], serde_json::json!({ "A": "B" }));
  assert_eq!(json["worklist"][0]["address"], "meta2");
  assert_eq!(json["worklist"][0]["new_uri"], "B");
}

#[test]
fn diff_against_same_cache_is_empty() {
  let env = TestEnv::scenario();

  env
    .cmd("diff")
    .arg("--new-cache")
    .arg(&env.cache_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("No minted items changed links"));
}

#[test]
fn diff_does_not_write_cache() {
  let env = TestEnv::scenario();
  let before = std::fs::read_to_string(&env.cache_path).unwrap();

  env.cmd("diff").arg("--new-cache").arg(&env.new_cache_path).assert().success();

  assert_eq!(std::fs::read_to_string(&env.cache_path).unwrap(), before);
}
