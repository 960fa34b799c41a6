//! Update command integration tests.

use candysync_lib::cache::load_cache;
use candysync_lib::submit::UpdateBatch;
use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn dry_run_reports_counts() {
  let env = TestEnv::scenario();

  env
    .update_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Finished signing metadata for 1 NFTs"))
    .stderr(predicate::str::contains("Dry run"));
}

#[test]
fn out_file_receives_batches() {
  let env = TestEnv::scenario();
  let out = env.path("batches.jsonl");

  env.update_cmd().arg("--out").arg(&out).assert().success();

  let content = std::fs::read_to_string(&out).unwrap();
  let batches: Vec<UpdateBatch> = content.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
  assert_eq!(batches.len(), 1);
  assert_eq!(batches[0].updates[0].metadata_address, "meta2");
  assert_eq!(batches[0].updates[0].data.uri, "B");
  assert_eq!(batches[0].updates[0].primary_sale_happened, None);
}

#[test]
fn write_cache_persists_pending_refresh() {
  let env = TestEnv::scenario();

  env.update_cmd().arg("--write-cache").assert().success();

  let cache = load_cache(&env.cache_path).unwrap();
  assert_eq!(cache.get(5).unwrap().link, "Y");
  // Minted items keep their old link in the current cache.
  assert_eq!(cache.get(2).unwrap().link, "A");
  assert_eq!(cache.get(5).unwrap().extra["name"], "#5");
}

#[test]
fn json_report() {
  let env = TestEnv::scenario();

  let output = env.update_cmd().arg("--output").arg("json").assert().success();
  let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

  assert_eq!(json["item_count"], 16);
  assert_eq!(json["pending"], 12);
  assert_eq!(json["changed"], 1);
  assert_eq!(json["to_update"], 1);
  assert_eq!(json["processed"], 1);
  assert_eq!(json["batches"], 1);
}

#[test]
fn bounded_daemon_runs() {
  let env = TestEnv::scenario();

  env
    .update_cmd()
    .arg("--daemon")
    .arg("--max-runs")
    .arg("2")
    .arg("--interval")
    .arg("0s")
    .assert()
    .success()
    .stdout(predicate::str::contains("Finished signing metadata"));
}

#[test]
fn zero_batch_size_is_rejected() {
  let env = TestEnv::scenario();

  env.update_cmd().arg("--batch-size").arg("0").assert().failure();
}

#[test]
fn invalid_authority_is_rejected() {
  let env = TestEnv::scenario();

  env
    .cmd("update")
    .arg("--new-cache")
    .arg(&env.new_cache_path)
    .arg("--authority")
    .arg("not-a-key")
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid address"));
}

#[test]
fn misaligned_cache_fails() {
  let env = TestEnv::scenario();
  let short = env.path("short.json");
  std::fs::write(&short, r#"{"items":{"0":{"link":"A"}}}"#).unwrap();

  env
    .cmd("update")
    .arg("--new-cache")
    .arg(&short)
    .arg("--authority")
    .arg(super::common::AUTHORITY)
    .assert()
    .failure()
    .stderr(predicate::str::contains("missing from candidate cache"));
}
