//! candysync-lib: cache-to-ledger metadata reconciliation.
//!
//! Given a candy machine account and two generations of its off-chain cache,
//! this crate works out which minted items point at stale links and pushes
//! the new links to the ledger in paced batches:
//! - `bitmap`: decode which items are still unminted
//! - `cache`: load, validate and diff cache snapshots
//! - `matcher`: join changed links with fetched metadata records
//! - `schedule`: batch, pace and submit the resulting worklist
//! - `reconcile`: the end-to-end pipeline and its long-running mode

pub mod bitmap;
pub mod cache;
pub mod consts;
pub mod layout;
pub mod ledger;
pub mod matcher;
pub mod reconcile;
pub mod schedule;
pub mod submit;
