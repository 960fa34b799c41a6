//! Submitter collaborator and the per-record update transform.
//!
//! A [`Submitter`] receives one [`UpdateBatch`] at a time and is responsible
//! for turning it into a single ledger transaction, including signing and any
//! retry policy of its own.

mod jsonl;
mod recording;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::LinkDiff;
use crate::ledger::{Address, OnChainRecord};

pub use jsonl::JsonlSubmitter;
pub use recording::RecordingSubmitter;

/// Errors returned by a submitter for one batch.
#[derive(Debug, Error)]
pub enum SubmitError {
  /// The ledger refused or timed out on the transaction.
  #[error("batch {batch} rejected: {reason}")]
  Rejected { batch: usize, reason: String },

  #[error("failed to write batch to {path}: {source}")]
  Io {
    path: std::path::PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to serialize batch: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// Creator entry as sent in an update, address already base58 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCreator {
  pub address: String,
  pub verified: bool,
  pub share: u8,
}

/// New data section for a metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateData {
  pub name: String,
  pub symbol: String,
  pub uri: String,
  pub seller_fee_basis_points: u16,
  pub creators: Option<Vec<UpdateCreator>>,
}

/// Arguments of one metadata update instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUpdate {
  pub metadata_address: String,
  pub data: UpdateData,
  pub update_authority: String,
  /// Always `None`: updates never touch the primary sale flag.
  pub primary_sale_happened: Option<bool>,
}

/// One group of updates sent as a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBatch {
  /// Zero-based position of this batch within the run.
  pub index: usize,
  pub updates: Vec<MetadataUpdate>,
}

impl UpdateBatch {
  pub fn len(&self) -> usize {
    self.updates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.updates.is_empty()
  }
}

/// Sends update batches to the ledger.
#[async_trait]
pub trait Submitter: Send + Sync {
  /// Key that signs the updates and becomes their update authority.
  fn authority(&self) -> Address;

  async fn submit(&self, batch: &UpdateBatch) -> Result<(), SubmitError>;
}

/// Build the update for `record`, pointing it at its new link.
///
/// Returns `None` if the record's uri has no entry in `diff`.
pub fn prepare_update(record: &OnChainRecord, diff: &LinkDiff, authority: &Address) -> Option<MetadataUpdate> {
  let data = &record.metadata.data;
  let uri = diff.get(&data.uri)?;

  let creators = data.creators.as_ref().map(|creators| {
    creators
      .iter()
      .map(|c| UpdateCreator {
        address: c.address.to_base58(),
        verified: c.verified,
        share: c.share,
      })
      .collect()
  });

  Some(MetadataUpdate {
    metadata_address: record.address.clone(),
    data: UpdateData {
      name: data.name.clone(),
      symbol: data.symbol.clone(),
      uri: uri.to_string(),
      seller_fee_basis_points: data.seller_fee_basis_points,
      creators,
    },
    update_authority: authority.to_base58(),
    primary_sale_happened: None,
  })
}
