//! Types for reconciliation runs.

use std::num::NonZeroU64;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::bitmap::{BitmapError, PendingSet};
use crate::cache::{CacheError, CacheSnapshot, LinkDiff};
use crate::consts::DEFAULT_SIGNING_INTERVAL;
use crate::ledger::{LedgerError, OnChainRecord};
use crate::schedule::ScheduleError;

/// Errors that abort a reconciliation run.
#[derive(Debug, Error)]
pub enum ReconcileError {
  #[error("ledger error: {0}")]
  Ledger(#[from] LedgerError),

  #[error("bitmap error: {0}")]
  Bitmap(#[from] BitmapError),

  #[error("cache error: {0}")]
  Cache(#[from] CacheError),

  #[error("schedule error: {0}")]
  Schedule(#[from] ScheduleError),
}

/// Inputs of one reconciliation.
///
/// `current` is refreshed in place for pending items, so a job reused across
/// runs carries those refreshes forward.
#[derive(Debug, Clone)]
pub struct ReconcileJob {
  /// Address of the candy machine account.
  pub collection: String,
  pub current: CacheSnapshot,
  pub candidate: CacheSnapshot,
}

impl ReconcileJob {
  pub fn new(collection: impl Into<String>, current: CacheSnapshot, candidate: CacheSnapshot) -> Self {
    Self {
      collection: collection.into(),
      current,
      candidate,
    }
  }

  /// Number of items in the collection, taken from the current cache.
  pub fn item_count(&self) -> usize {
    self.current.len()
  }
}

/// Everything computed before any submission happens.
#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
  pub item_count: usize,
  pub pending: PendingSet,
  pub diff: LinkDiff,
  pub worklist: Vec<OnChainRecord>,
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
  pub item_count: usize,
  pub pending: usize,
  pub changed: usize,
  pub to_update: usize,
  pub processed: usize,
  pub batches: usize,
}

/// Settings for the long-running mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaemonOptions {
  /// Cooldown between the end of one run and the start of the next.
  pub interval: Duration,
  /// Stop after this many runs; `None` runs forever.
  pub max_runs: Option<NonZeroU64>,
}

impl Default for DaemonOptions {
  fn default() -> Self {
    Self {
      interval: DEFAULT_SIGNING_INTERVAL,
      max_runs: None,
    }
  }
}

/// Outcome of a bounded daemon session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaemonSummary {
  pub runs: u64,
  pub failures: u64,
  pub last_report: Option<ReconcileReport>,
}
