//! Implementation of the `candysync diff` command.
//!
//! Computes the link diff and the update worklist without submitting
//! anything.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use candysync_lib::reconcile::{ReconcileJob, plan_updates};

use super::common::{Source, load_candidate, runtime};
use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols, truncate_address};

pub fn cmd_diff(source: &Source, new_cache: &Path, format: OutputFormat) -> Result<()> {
  let ledger = source.load_ledger()?;
  let mut job = ReconcileJob::new(source.collection.clone(), source.load_cache()?, load_candidate(new_cache)?);

  let rt = runtime()?;
  let plan = rt.block_on(plan_updates(&ledger, &mut job)).context("Failed to plan updates")?;

  if format.is_json() {
    let worklist: Vec<_> = plan
      .worklist
      .iter()
      .map(|r| {
        serde_json::json!({
          "address": r.address,
          "uri": r.uri(),
          "new_uri": plan.diff.get(r.uri()),
        })
      })
      .collect();
    return print_json(&serde_json::json!({
      "item_count": plan.item_count,
      "pending": plan.pending.len(),
      "changed": plan.diff,
      "worklist": worklist,
    }));
  }

  print_stat("Items", &plan.item_count.to_string());
  print_stat("Pending", &plan.pending.len().to_string());
  print_stat("Changed links", &plan.diff.len().to_string());
  print_stat("Records to update", &plan.worklist.len().to_string());

  if plan.diff.is_empty() {
    println!();
    print_info("No minted items changed links.");
    return Ok(());
  }

  println!();
  println!("Changed links:");
  for (old, new) in plan.diff.iter() {
    println!(
      "  {} {} {} {}",
      symbols::MODIFY.if_supports_color(Stream::Stdout, |s| s.yellow()),
      old,
      symbols::ARROW,
      new.if_supports_color(Stream::Stdout, |s| s.green())
    );
  }

  if !plan.worklist.is_empty() {
    println!();
    println!("Records:");
    for record in &plan.worklist {
      println!("  {} {} {}", symbols::INFO, truncate_address(&record.address), record.uri());
    }
  }

  Ok(())
}
