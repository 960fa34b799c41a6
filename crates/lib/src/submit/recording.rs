use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::info;

use super::{SubmitError, Submitter, UpdateBatch};
use crate::ledger::Address;

/// Dry-run submitter: logs each batch and keeps it in memory.
///
/// A rejection can be scheduled for a given batch index to exercise abort
/// handling.
#[derive(Debug)]
pub struct RecordingSubmitter {
  authority: Address,
  batches: Mutex<Vec<UpdateBatch>>,
  reject_at: Option<(usize, String)>,
}

impl RecordingSubmitter {
  pub fn new(authority: Address) -> Self {
    Self {
      authority,
      batches: Mutex::new(Vec::new()),
      reject_at: None,
    }
  }

  /// Fail the batch with the given index instead of recording it.
  pub fn with_rejection_at(mut self, batch: usize, reason: impl Into<String>) -> Self {
    self.reject_at = Some((batch, reason.into()));
    self
  }

  /// Batches accepted so far, in submission order.
  pub fn batches(&self) -> Vec<UpdateBatch> {
    self.batches.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }
}

#[async_trait]
impl Submitter for RecordingSubmitter {
  fn authority(&self) -> Address {
    self.authority
  }

  async fn submit(&self, batch: &UpdateBatch) -> Result<(), SubmitError> {
    if let Some((_, reason)) = self.reject_at.as_ref().filter(|(index, _)| *index == batch.index) {
      return Err(SubmitError::Rejected {
        batch: batch.index,
        reason: reason.clone(),
      });
    }

    for update in &batch.updates {
      info!(
        batch = batch.index,
        metadata = %update.metadata_address,
        uri = %update.data.uri,
        "would update metadata"
      );
    }
    self
      .batches
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(batch.clone());
    Ok(())
  }
}
