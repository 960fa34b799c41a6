//! Reconciliation pipeline.
//!
//! One run performs, strictly in sequence:
//!
//! 1. Fetch the candy machine account and decode the availability bitmap
//! 2. Diff the current cache against the candidate cache
//! 3. Fetch metadata records for the collection's creator address
//! 4. Match records against the changed links
//! 5. Submit the worklist in paced batches

mod daemon;
mod types;

use tracing::info;

use crate::bitmap::{BitmapError, PendingSet, decode_account};
use crate::cache::diff_caches;
use crate::ledger::LedgerReader;
use crate::matcher::match_records;
use crate::schedule::BatchScheduler;
use crate::submit::Submitter;

pub use types::{DaemonOptions, DaemonSummary, ReconcileError, ReconcileJob, ReconcilePlan, ReconcileReport};

/// Fetch the collection account and return the indices not yet minted.
pub async fn fetch_pending<L>(ledger: &L, collection: &str, item_count: usize) -> Result<PendingSet, ReconcileError>
where
  L: LedgerReader + ?Sized,
{
  let data = ledger
    .get_account_info(collection)
    .await?
    .ok_or_else(|| BitmapError::AccountNotFound(collection.to_string()))?;
  Ok(decode_account(&data, item_count)?)
}

/// Compute the worklist for `job` without submitting anything.
///
/// Pending items are refreshed in `job.current` as a side effect.
pub async fn plan_updates<L>(ledger: &L, job: &mut ReconcileJob) -> Result<ReconcilePlan, ReconcileError>
where
  L: LedgerReader + ?Sized,
{
  let item_count = job.item_count();
  let pending = fetch_pending(ledger, &job.collection, item_count).await?;
  info!(items = item_count, pending = pending.len(), "decoded availability bitmap");

  let diff = diff_caches(item_count, &pending, &mut job.current, &job.candidate)?;

  let creator = ledger.derive_creator_address(&job.collection)?;
  let records = ledger.get_accounts_by_creator_address(&creator).await?;
  let worklist = match_records(records, &diff);
  info!(to_update = worklist.len(), changed = diff.len(), "found uris to update");

  Ok(ReconcilePlan {
    item_count,
    pending,
    diff,
    worklist,
  })
}

/// Drives reconciliation runs against one ledger and one submitter.
#[derive(Debug)]
pub struct Reconciler<L, S> {
  ledger: L,
  submitter: S,
  scheduler: BatchScheduler,
}

impl<L, S> Reconciler<L, S>
where
  L: LedgerReader,
  S: Submitter,
{
  pub fn new(ledger: L, submitter: S, scheduler: BatchScheduler) -> Self {
    Self {
      ledger,
      submitter,
      scheduler,
    }
  }

  pub fn submitter(&self) -> &S {
    &self.submitter
  }

  /// Run the full pipeline once.
  pub async fn run(&self, job: &mut ReconcileJob) -> Result<ReconcileReport, ReconcileError> {
    let plan = plan_updates(&self.ledger, job).await?;

    let mut report = ReconcileReport {
      item_count: plan.item_count,
      pending: plan.pending.len(),
      changed: plan.diff.len(),
      to_update: plan.worklist.len(),
      ..Default::default()
    };

    let outcome = self.scheduler.run(plan.worklist, &plan.diff, &self.submitter).await?;
    report.processed = outcome.processed;
    report.batches = outcome.batches;

    Ok(report)
  }
}
