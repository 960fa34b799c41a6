//! Implementation of the `candysync pending` command.
//!
//! Decodes the candy machine's availability bitmap and lists the items that
//! have not been minted yet.

use anyhow::{Context, Result};

use candysync_lib::reconcile::fetch_pending;

use super::common::{Source, runtime};
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success};

pub fn cmd_pending(source: &Source, format: OutputFormat) -> Result<()> {
  let ledger = source.load_ledger()?;
  let cache = source.load_cache()?;
  let item_count = cache.len();

  let rt = runtime()?;
  let pending = rt
    .block_on(fetch_pending(&ledger, &source.collection, item_count))
    .context("Failed to decode availability bitmap")?;
  let indices: Vec<usize> = pending.iter().collect();

  if format.is_json() {
    return print_json(&serde_json::json!({
      "item_count": item_count,
      "minted": item_count - indices.len(),
      "pending": indices,
    }));
  }

  print_success(&format!("Collection {}", source.collection));
  print_stat("Items", &item_count.to_string());
  print_stat("Minted", &(item_count - indices.len()).to_string());
  print_stat("Pending", &indices.len().to_string());

  if !indices.is_empty() {
    println!();
    let list: Vec<String> = indices.iter().map(usize::to_string).collect();
    print_info(&format!("Unminted indices: {}", list.join(", ")));
  }

  Ok(())
}
