//! Off-chain cache snapshots.
//!
//! A cache file describes the intended metadata for every item in the
//! collection. Two generations are compared per run: the `current` cache
//! (what was last pushed on-chain) and the `candidate` cache (desired state).

mod diff;
mod storage;
mod types;

pub use diff::{LinkDiff, diff_caches};
pub use storage::{load_cache, save_cache};
pub use types::{CacheError, CacheSnapshot, ItemRecord, SnapshotSide};
