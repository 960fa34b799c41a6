//! Link diff between the current and candidate caches.
//!
//! Only minted items have a live metadata account, so only their link
//! changes become ledger work. Pending items get their link refreshed in the
//! current cache and are written fresh at mint time.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::bitmap::PendingSet;

use super::types::{CacheError, CacheSnapshot, SnapshotSide};

/// Mapping from a minted item's old link to its new link.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkDiff(BTreeMap<String, String>);

impl LinkDiff {
  /// Record a change. Returns the new link previously stored for `old`, if
  /// another item already mapped from the same link.
  pub fn insert(&mut self, old: impl Into<String>, new: impl Into<String>) -> Option<String> {
    self.0.insert(old.into(), new.into())
  }

  pub fn get(&self, old: &str) -> Option<&str> {
    self.0.get(old).map(String::as_str)
  }

  pub fn contains(&self, old: &str) -> bool {
    self.0.contains_key(old)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(old, new)| (old.as_str(), new.as_str()))
  }
}

/// Compare `current` against `candidate` for items `0..item_count`.
///
/// - Pending items: the candidate link is copied into `current`.
/// - Minted items: a changed link is recorded as `old -> new`.
///
/// If two minted items share an old link the later index wins.
pub fn diff_caches(
  item_count: usize,
  pending: &PendingSet,
  current: &mut CacheSnapshot,
  candidate: &CacheSnapshot,
) -> Result<LinkDiff, CacheError> {
  let mut diff = LinkDiff::default();

  for index in 0..item_count {
    let new_link = &candidate
      .get(index)
      .ok_or(CacheError::MissingItem {
        index,
        side: SnapshotSide::Candidate,
      })?
      .link;
    let record = current.get_mut(index).ok_or(CacheError::MissingItem {
      index,
      side: SnapshotSide::Current,
    })?;

    if pending.contains(index) {
      if record.link != *new_link {
        debug!(index, link = %new_link, "refreshing pending item link");
      }
      record.link.clone_from(new_link);
    } else if record.link != *new_link {
      if let Some(previous) = diff.insert(record.link.clone(), new_link.clone()) {
        warn!(
          index,
          old = %record.link,
          replaced = %previous,
          "multiple minted items share a link; keeping the latest"
        );
      }
    }
  }

  debug!(changed = diff.len(), "computed link diff");
  Ok(diff)
}
