//! Inputs shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use candysync_lib::cache::{CacheSnapshot, load_cache};
use candysync_lib::ledger::{MemoryLedger, load_fixture};

/// Where the ledger state and the current cache come from.
#[derive(Debug, Args)]
pub struct Source {
  /// Ledger fixture (JSON) with the candy machine account and metadata records
  #[arg(long)]
  pub ledger: PathBuf,

  /// Candy machine account address
  #[arg(long)]
  pub collection: String,

  /// Cache file reflecting what was last pushed on-chain
  #[arg(long)]
  pub cache: PathBuf,
}

impl Source {
  pub fn load_ledger(&self) -> Result<MemoryLedger> {
    load_fixture(&self.ledger).with_context(|| format!("Failed to load ledger fixture: {}", self.ledger.display()))
  }

  pub fn load_cache(&self) -> Result<CacheSnapshot> {
    load_cache(&self.cache).with_context(|| format!("Failed to load cache: {}", self.cache.display()))
  }
}

pub fn load_candidate(path: &Path) -> Result<CacheSnapshot> {
  load_cache(path).with_context(|| format!("Failed to load new cache: {}", path.display()))
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
  tokio::runtime::Runtime::new().context("Failed to create async runtime")
}
