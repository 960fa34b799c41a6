use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::address::Address;

/// Errors reading from the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
  #[error("invalid address: {0}")]
  InvalidAddress(String),

  #[error("no creator address known for collection {0}")]
  UnknownCollection(String),

  #[error("failed to read ledger fixture {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse ledger fixture: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("invalid base64 data for account {address}: {source}")]
  InvalidAccountData {
    address: String,
    #[source]
    source: base64::DecodeError,
  },
}

/// A creator entry of an on-chain metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainCreator {
  pub address: Address,
  pub verified: bool,
  pub share: u8,
}

/// The mutable data section of a metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataData {
  pub name: String,
  pub symbol: String,
  pub uri: String,
  pub seller_fee_basis_points: u16,
  pub creators: Option<Vec<OnChainCreator>>,
}

/// A metadata record as read from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
  pub update_authority: Address,
  pub mint: Address,
  pub data: MetadataData,
  #[serde(default)]
  pub primary_sale_happened: bool,
  #[serde(default = "default_mutable")]
  pub is_mutable: bool,
}

const fn default_mutable() -> bool {
  true
}

/// A fetched metadata record paired with the address of its account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnChainRecord {
  pub metadata: Metadata,
  pub address: String,
}

impl OnChainRecord {
  /// The content URI the record currently points at.
  pub fn uri(&self) -> &str {
    &self.metadata.data.uri
  }
}
