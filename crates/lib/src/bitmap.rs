//! Availability bitmap decoding.
//!
//! A set bit means the item has been minted; a clear bit means it is still
//! pending. Bits are packed MSB first, so item `8 * i + j` is tested with
//! `0x80 >> j` on byte `i`.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crate::layout::{bitmap_len, bitmap_offset};

/// Precondition failures while reading the bitmap out of an account blob.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitmapError {
  /// The collection account does not exist on the ledger.
  #[error("account not found: {0}")]
  AccountNotFound(String),

  /// The blob ends before the bitmap region begins.
  #[error("account data too short: bitmap starts at byte {offset}, data is {len} bytes")]
  TooShort { offset: usize, len: usize },

  /// The bitmap region cannot hold one bit per item.
  #[error("bitmap truncated: {item_count} items need {needed} bytes, found {found}")]
  Truncated {
    item_count: usize,
    needed: usize,
    found: usize,
  },
}

/// Indices of items that have not been minted yet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingSet(BTreeSet<usize>);

impl PendingSet {
  pub fn contains(&self, index: usize) -> bool {
    self.0.contains(&index)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter().copied()
  }
}

impl FromIterator<usize> for PendingSet {
  fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// Locate the bitmap inside a full candy machine account blob and decode it.
pub fn decode_account(data: &[u8], item_count: usize) -> Result<PendingSet, BitmapError> {
  let offset = bitmap_offset(item_count);
  if data.len() < offset {
    return Err(BitmapError::TooShort { offset, len: data.len() });
  }
  decode_bitmap(&data[offset..], item_count)
}

/// Decode a bare bitmap region.
///
/// Iteration is bounded by `item_count`, so padding bits in the last byte
/// are never reported as pending.
pub fn decode_bitmap(bitmap: &[u8], item_count: usize) -> Result<PendingSet, BitmapError> {
  let needed = bitmap_len(item_count);
  if bitmap.len() < needed {
    return Err(BitmapError::Truncated {
      item_count,
      needed,
      found: bitmap.len(),
    });
  }

  let pending = (0..item_count)
    .filter(|&index| {
      let byte = bitmap[index / 8];
      let mask = (1u8 << 7) >> (index % 8);
      byte & mask == 0
    })
    .inspect(|index| debug!(index, "unminted token index"))
    .collect();

  Ok(pending)
}
