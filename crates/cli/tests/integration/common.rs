//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use candysync_lib::layout::bitmap_offset;
use candysync_lib::ledger::LedgerFixture;
use tempfile::TempDir;

pub const COLLECTION: &str = "CndyV2";
pub const AUTHORITY: &str = "11111111111111111111111111111111";

const CREATOR: &str = "CreatorPda";

/// One metadata record as stored in a ledger fixture.
fn record_json(address: &str, uri: &str) -> serde_json::Value {
  serde_json::json!({
    "address": address,
    "metadata": {
      "updateAuthority": AUTHORITY,
      "mint": AUTHORITY,
      "data": {
        "name": address,
        "symbol": "ITM",
        "uri": uri,
        "sellerFeeBasisPoints": 500,
        "creators": [{ "address": AUTHORITY, "verified": true, "share": 100 }]
      },
      "primarySaleHappened": true
    }
  })
}

fn cache_json(links: &[String]) -> String {
  let items: serde_json::Map<String, serde_json::Value> = links
    .iter()
    .enumerate()
    .map(|(i, link)| (i.to_string(), serde_json::json!({ "link": link, "name": format!("#{i}"), "onChain": true })))
    .collect();
  serde_json::to_string_pretty(&serde_json::json!({ "program": { "uuid": "abc123" }, "items": items })).unwrap()
}

/// Isolated test environment.
///
/// 16 items with 0..4 minted. Item 2 changes `A -> B` and pending item 5
/// changes `X -> Y`; the ledger holds records for the four minted items.
pub struct TestEnv {
  pub temp: TempDir,
  pub ledger_path: PathBuf,
  pub cache_path: PathBuf,
  pub new_cache_path: PathBuf,
}

impl TestEnv {
  pub fn scenario() -> Self {
    let mut current: Vec<String> = (0..16).map(|i| format!("https://arweave.net/{i}")).collect();
    current[2] = "A".to_string();
    current[5] = "X".to_string();
    let mut candidate = current.clone();
    candidate[2] = "B".to_string();
    candidate[5] = "Y".to_string();

    let mut data = vec![0u8; bitmap_offset(16)];
    data.extend_from_slice(&[0b1111_0000, 0b0000_0000]);

    let records: Vec<_> = (0..4).map(|i| record_json(&format!("meta{i}"), &current[i])).collect();
    let mut fixture: LedgerFixture = serde_json::from_value(serde_json::json!({
      "creators": { COLLECTION: CREATOR },
      "records": { CREATOR: records },
    }))
    .unwrap();
    fixture.insert_account(COLLECTION, &data);

    let temp = TempDir::new().unwrap();
    let env = Self {
      ledger_path: temp.path().join("ledger.json"),
      cache_path: temp.path().join("cache.json"),
      new_cache_path: temp.path().join("new-cache.json"),
      temp,
    };
    std::fs::write(&env.ledger_path, serde_json::to_string_pretty(&fixture).unwrap()).unwrap();
    std::fs::write(&env.cache_path, cache_json(&current)).unwrap();
    std::fs::write(&env.new_cache_path, cache_json(&candidate)).unwrap();
    env
  }

  /// Path for a file inside the temp directory.
  pub fn path(&self, name: &str) -> PathBuf {
    self.temp.path().join(name)
  }

  /// A command for `subcommand` with the ledger, collection and cache set.
  pub fn cmd(&self, subcommand: &str) -> Command {
    self.cmd_for(subcommand, COLLECTION)
  }

  /// Like [`TestEnv::cmd`] but targeting another collection address.
  pub fn cmd_for(&self, subcommand: &str, collection: &str) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("candysync");
    cmd
      .env_remove("RUST_LOG")
      .arg(subcommand)
      .arg("--ledger")
      .arg(&self.ledger_path)
      .arg("--collection")
      .arg(collection)
      .arg("--cache")
      .arg(&self.cache_path);
    cmd
  }

  /// A configured `update` command with zero pacing.
  pub fn update_cmd(&self) -> Command {
    let mut cmd = self.cmd("update");
    cmd
      .arg("--new-cache")
      .arg(&self.new_cache_path)
      .arg("--authority")
      .arg(AUTHORITY)
      .arg("--pacing")
      .arg("0s");
    cmd
  }
}
