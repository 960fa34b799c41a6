//! Implementation of the `candysync update` command.
//!
//! Reconciles the candy machine's minted items with the new cache: every
//! minted item whose link changed gets a metadata update, submitted in paced
//! batches. Without `--out` the run is a dry run that only logs the batches.

use std::num::{NonZeroU64, NonZeroUsize};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use candysync_lib::cache::save_cache;
use candysync_lib::consts::{DEFAULT_BATCH_SIZE, DEFAULT_PACING, DEFAULT_SIGNING_INTERVAL};
use candysync_lib::ledger::{Address, MemoryLedger};
use candysync_lib::reconcile::{DaemonOptions, ReconcileJob, ReconcileReport, Reconciler};
use candysync_lib::schedule::BatchScheduler;
use candysync_lib::submit::{JsonlSubmitter, RecordingSubmitter, Submitter};

use super::common::{Source, load_candidate, runtime};
use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_success, print_warning};

#[derive(Debug, Args)]
pub struct UpdateArgs {
  #[command(flatten)]
  pub source: Source,

  /// Cache file with the desired links
  #[arg(long)]
  pub new_cache: PathBuf,

  /// Update authority public key (base58)
  #[arg(long)]
  pub authority: Address,

  /// Number of metadata updates per transaction
  #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
  pub batch_size: NonZeroUsize,

  /// Delay before each batch (e.g. 500ms, 2s)
  #[arg(long, default_value_t = DEFAULT_PACING.into())]
  pub pacing: humantime::Duration,

  /// Append batches as JSON lines to this file instead of a dry run
  #[arg(long)]
  pub out: Option<PathBuf>,

  /// Write the refreshed current cache back to --cache when done
  #[arg(long)]
  pub write_cache: bool,

  /// Keep running, repeating the reconciliation after every interval
  #[arg(long)]
  pub daemon: bool,

  /// Cooldown between runs in daemon mode (e.g. 60s, 5m)
  #[arg(long, default_value_t = DEFAULT_SIGNING_INTERVAL.into())]
  pub interval: humantime::Duration,

  /// Stop daemon mode after this many runs
  #[arg(long)]
  pub max_runs: Option<NonZeroU64>,
}

pub fn cmd_update(args: &UpdateArgs, format: OutputFormat) -> Result<()> {
  let start = Instant::now();
  let ledger = args.source.load_ledger()?;
  let mut job = ReconcileJob::new(
    args.source.collection.clone(),
    args.source.load_cache()?,
    load_candidate(&args.new_cache)?,
  );
  let scheduler = BatchScheduler::new(args.batch_size, args.pacing.into());

  let report = match &args.out {
    Some(path) => run(ledger, JsonlSubmitter::new(path, args.authority), scheduler, &mut job, args)?,
    None => {
      if !format.is_json() {
        print_warning("Dry run - no --out given, batches are only logged");
      }
      run(ledger, RecordingSubmitter::new(args.authority), scheduler, &mut job, args)?
    }
  };

  if args.write_cache {
    save_cache(&args.source.cache, &job.current)
      .with_context(|| format!("Failed to write cache: {}", args.source.cache.display()))?;
    info!(path = %args.source.cache.display(), "refreshed cache written");
  }

  let Some(report) = report else {
    bail!("No reconciliation run succeeded");
  };

  if format.is_json() {
    return print_json(&report);
  }

  print_success(&format!("Finished signing metadata for {} NFTs", report.processed));
  print_stat("Items", &report.item_count.to_string());
  print_stat("Pending", &report.pending.to_string());
  print_stat("Changed links", &report.changed.to_string());
  print_stat("Records updated", &report.to_update.to_string());
  print_stat("Batches", &report.batches.to_string());
  if args.write_cache {
    print_stat("Cache written", &args.source.cache.display().to_string());
  }
  print_stat("Elapsed", &format_duration(start.elapsed()));

  Ok(())
}

/// Run once, or in daemon mode until `--max-runs`.
///
/// Returns the last successful report; `None` only in daemon mode when no
/// run succeeded.
fn run<S: Submitter>(
  ledger: MemoryLedger,
  submitter: S,
  scheduler: BatchScheduler,
  job: &mut ReconcileJob,
  args: &UpdateArgs,
) -> Result<Option<ReconcileReport>> {
  let reconciler = Reconciler::new(ledger, submitter, scheduler);
  let rt = runtime()?;

  if !args.daemon {
    let report = rt.block_on(reconciler.run(job)).context("Update failed")?;
    return Ok(Some(report));
  }

  let options = DaemonOptions {
    interval: args.interval.into(),
    max_runs: args.max_runs,
  };
  let summary = rt.block_on(reconciler.run_daemon(job, &options));
  if summary.failures > 0 {
    print_warning(&format!("{} of {} runs failed", summary.failures, summary.runs));
  }
  Ok(summary.last_report)
}
