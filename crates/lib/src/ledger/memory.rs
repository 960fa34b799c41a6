use std::collections::HashMap;

use async_trait::async_trait;

use super::LedgerReader;
use super::types::{LedgerError, OnChainRecord};

/// A ledger held entirely in memory.
///
/// Used for offline runs from a fixture file and as the test double for the
/// pipeline.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
  accounts: HashMap<String, Vec<u8>>,
  creators: HashMap<String, String>,
  records: HashMap<String, Vec<OnChainRecord>>,
}

impl MemoryLedger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_account(mut self, address: impl Into<String>, data: Vec<u8>) -> Self {
    self.accounts.insert(address.into(), data);
    self
  }

  pub fn with_creator(mut self, collection: impl Into<String>, creator: impl Into<String>) -> Self {
    self.creators.insert(collection.into(), creator.into());
    self
  }

  pub fn with_records(mut self, creator: impl Into<String>, records: Vec<OnChainRecord>) -> Self {
    self.records.entry(creator.into()).or_default().extend(records);
    self
  }
}

#[async_trait]
impl LedgerReader for MemoryLedger {
  async fn get_account_info(&self, address: &str) -> Result<Option<Vec<u8>>, LedgerError> {
    Ok(self.accounts.get(address).cloned())
  }

  async fn get_accounts_by_creator_address(&self, creator: &str) -> Result<Vec<OnChainRecord>, LedgerError> {
    Ok(self.records.get(creator).cloned().unwrap_or_default())
  }

  fn derive_creator_address(&self, collection: &str) -> Result<String, LedgerError> {
    self
      .creators
      .get(collection)
      .cloned()
      .ok_or_else(|| LedgerError::UnknownCollection(collection.to_string()))
  }
}
