//! Offline ledger fixtures.
//!
//! A fixture is a JSON document capturing everything the reconciler reads
//! from the ledger:
//!
//! ```json
//! {
//!   "accounts": { "<address>": "<base64 account data>" },
//!   "creators": { "<collection>": "<creator address>" },
//!   "records": { "<creator address>": [ { "address": "...", "metadata": { ... } } ] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::memory::MemoryLedger;
use super::types::{LedgerError, OnChainRecord};

/// Serialized form of a [`MemoryLedger`].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LedgerFixture {
  #[serde(default)]
  pub accounts: BTreeMap<String, String>,
  #[serde(default)]
  pub creators: BTreeMap<String, String>,
  #[serde(default)]
  pub records: BTreeMap<String, Vec<OnChainRecord>>,
}

impl LedgerFixture {
  /// Store raw account data, base64 encoded.
  pub fn insert_account(&mut self, address: impl Into<String>, data: &[u8]) {
    self.accounts.insert(address.into(), STANDARD.encode(data));
  }

  pub fn into_ledger(self) -> Result<MemoryLedger, LedgerError> {
    let mut ledger = MemoryLedger::new();

    for (address, encoded) in self.accounts {
      let data = STANDARD
        .decode(encoded.as_bytes())
        .map_err(|source| LedgerError::InvalidAccountData {
          address: address.clone(),
          source,
        })?;
      ledger = ledger.with_account(address, data);
    }
    for (collection, creator) in self.creators {
      ledger = ledger.with_creator(collection, creator);
    }
    for (creator, records) in self.records {
      ledger = ledger.with_records(creator, records);
    }

    Ok(ledger)
  }
}

/// Load a fixture file into an in-memory ledger.
pub fn load_fixture(path: &Path) -> Result<MemoryLedger, LedgerError> {
  let content = fs::read_to_string(path).map_err(|source| LedgerError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let fixture: LedgerFixture = serde_json::from_str(&content)?;
  debug!(
    path = %path.display(),
    accounts = fixture.accounts.len(),
    record_sets = fixture.records.len(),
    "loaded ledger fixture"
  );
  fixture.into_ledger()
}
