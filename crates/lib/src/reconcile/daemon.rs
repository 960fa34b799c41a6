//! Long-running mode.
//!
//! Re-runs the whole pipeline after a fixed cooldown. A failed run is logged
//! and retried from scratch on the next iteration; there is no per-batch
//! resume.

use tracing::{error, info};

use super::types::{DaemonOptions, DaemonSummary, ReconcileJob};
use super::Reconciler;
use crate::ledger::LedgerReader;
use crate::submit::Submitter;

impl<L, S> Reconciler<L, S>
where
  L: LedgerReader,
  S: Submitter,
{
  /// Run until `options.max_runs` is reached, or forever.
  pub async fn run_daemon(&self, job: &mut ReconcileJob, options: &DaemonOptions) -> DaemonSummary {
    let mut summary = DaemonSummary::default();

    loop {
      summary.runs += 1;
      match self.run(job).await {
        Ok(report) => {
          info!(run = summary.runs, processed = report.processed, "reconciliation run complete");
          summary.last_report = Some(report);
        }
        Err(e) => {
          error!(run = summary.runs, error = %e, "reconciliation run failed");
          summary.failures += 1;
        }
      }

      if options.max_runs.is_some_and(|max| summary.runs >= max.get()) {
        break;
      }
      tokio::time::sleep(options.interval).await;
    }

    summary
  }
}
