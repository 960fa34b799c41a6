//! Ledger collaborator.
//!
//! The reconciler only ever reads two things from the ledger: the raw
//! candy machine account and the metadata records whose first creator is
//! the collection's derived creator address. [`LedgerReader`] abstracts
//! both so the pipeline can run against a live node or an offline fixture.

mod address;
mod fixture;
mod memory;
mod types;

use async_trait::async_trait;

pub use address::Address;
pub use fixture::{LedgerFixture, load_fixture};
pub use memory::MemoryLedger;
pub use types::{LedgerError, Metadata, MetadataData, OnChainCreator, OnChainRecord};

/// Read access to the remote ledger.
#[async_trait]
pub trait LedgerReader: Send + Sync {
  /// Raw account data, or `None` when the account does not exist.
  async fn get_account_info(&self, address: &str) -> Result<Option<Vec<u8>>, LedgerError>;

  /// Metadata records created by `creator`, in ledger order.
  async fn get_accounts_by_creator_address(&self, creator: &str) -> Result<Vec<OnChainRecord>, LedgerError>;

  /// The creator address the collection signs its metadata with.
  fn derive_creator_address(&self, collection: &str) -> Result<String, LedgerError>;
}
