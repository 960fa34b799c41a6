//! Batched, paced submission of the update worklist.
//!
//! The worklist is consumed from the front in groups of at most
//! `batch_size`. Every group waits out the pacing delay, is transformed into
//! an [`UpdateBatch`], and is handed to the submitter. Batches never overlap:
//! the next delay only starts once the previous submission has returned.
//! The first submission error aborts the run.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::cache::LinkDiff;
use crate::consts::{DEFAULT_BATCH_SIZE, DEFAULT_PACING};
use crate::ledger::OnChainRecord;
use crate::submit::{SubmitError, Submitter, UpdateBatch, prepare_update};

#[derive(Debug, Error)]
pub enum ScheduleError {
  /// A worklist record has no new link to point at.
  #[error("no new link for record uri {uri}")]
  UnmatchedRecord { uri: String },

  #[error("submission of batch {batch} failed: {source}")]
  Submit {
    batch: usize,
    #[source]
    source: SubmitError,
  },
}

/// Totals for one completed scheduler run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOutcome {
  pub processed: usize,
  pub batches: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchScheduler {
  batch_size: NonZeroUsize,
  pacing: Duration,
}

impl Default for BatchScheduler {
  fn default() -> Self {
    Self {
      batch_size: DEFAULT_BATCH_SIZE,
      pacing: DEFAULT_PACING,
    }
  }
}

impl BatchScheduler {
  pub const fn new(batch_size: NonZeroUsize, pacing: Duration) -> Self {
    Self { batch_size, pacing }
  }

  pub const fn batch_size(&self) -> NonZeroUsize {
    self.batch_size
  }

  pub const fn pacing(&self) -> Duration {
    self.pacing
  }

  /// Drain `worklist` through `submitter`.
  pub async fn run<S>(
    &self,
    worklist: Vec<OnChainRecord>,
    diff: &LinkDiff,
    submitter: &S,
  ) -> Result<ScheduleOutcome, ScheduleError>
  where
    S: Submitter + ?Sized,
  {
    let authority = submitter.authority();
    let mut worklist = VecDeque::from(worklist);
    let mut outcome = ScheduleOutcome::default();

    while !worklist.is_empty() {
      let take = self.batch_size.get().min(worklist.len());
      let records: Vec<_> = worklist.drain(..take).collect();

      tokio::time::sleep(self.pacing).await;

      let updates = records
        .iter()
        .map(|record| {
          prepare_update(record, diff, &authority).ok_or_else(|| ScheduleError::UnmatchedRecord {
            uri: record.uri().to_string(),
          })
        })
        .collect::<Result<Vec<_>, _>>()?;

      let batch = UpdateBatch {
        index: outcome.batches,
        updates,
      };
      debug!(batch = batch.index, size = batch.len(), "signing metadata");
      submitter
        .submit(&batch)
        .await
        .map_err(|source| ScheduleError::Submit {
          batch: batch.index,
          source,
        })?;

      outcome.batches += 1;
      outcome.processed += take;
      debug!(total = outcome.processed, "processed nfts");
    }

    info!(total = outcome.processed, batches = outcome.batches, "finished signing metadata");
    Ok(outcome)
  }
}
