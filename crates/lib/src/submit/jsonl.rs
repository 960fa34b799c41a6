use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{SubmitError, Submitter, UpdateBatch};
use crate::ledger::Address;

/// Appends each batch as one JSON line to a file.
///
/// The file is the hand-off point to an external signer: one line per
/// transaction it has to sign and send.
#[derive(Debug, Clone)]
pub struct JsonlSubmitter {
  path: PathBuf,
  authority: Address,
}

impl JsonlSubmitter {
  pub fn new(path: impl Into<PathBuf>, authority: Address) -> Self {
    Self {
      path: path.into(),
      authority,
    }
  }

  fn io_err(&self, source: std::io::Error) -> SubmitError {
    SubmitError::Io {
      path: self.path.clone(),
      source,
    }
  }
}

#[async_trait]
impl Submitter for JsonlSubmitter {
  fn authority(&self) -> Address {
    self.authority
  }

  async fn submit(&self, batch: &UpdateBatch) -> Result<(), SubmitError> {
    let mut line = serde_json::to_vec(batch)?;
    line.push(b'\n');

    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)
      .await
      .map_err(|e| self.io_err(e))?;
    file.write_all(&line).await.map_err(|e| self.io_err(e))?;
    file.flush().await.map_err(|e| self.io_err(e))?;

    debug!(path = %self.path.display(), batch = batch.index, updates = batch.len(), "wrote batch");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::submit::{MetadataUpdate, UpdateData};
  use tempfile::TempDir;

  fn update(uri: &str) -> MetadataUpdate {
    MetadataUpdate {
      metadata_address: "meta".to_string(),
      data: UpdateData {
        name: "n".to_string(),
        symbol: "s".to_string(),
        uri: uri.to_string(),
        seller_fee_basis_points: 0,
        creators: None,
      },
      update_authority: "11111111111111111111111111111111".to_string(),
      primary_sale_happened: None,
    }
  }

  #[tokio::test]
  async fn appends_one_line_per_batch() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("batches.jsonl");
    let submitter = JsonlSubmitter::new(&path, Address::new([0; 32]));

    for index in 0..2 {
      let batch = UpdateBatch {
        index,
        updates: vec![update(&format!("uri-{index}"))],
      };
      submitter.submit(&batch).await.unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let batches: Vec<UpdateBatch> = content.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[1].index, 1);
    assert_eq!(batches[1].updates[0].data.uri, "uri-1");
  }

  #[tokio::test]
  async fn unwritable_path_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let submitter = JsonlSubmitter::new(temp_dir.path().join("missing/dir/out.jsonl"), Address::new([0; 32]));
    let batch = UpdateBatch {
      index: 0,
      updates: Vec::new(),
    };
    assert!(matches!(submitter.submit(&batch).await, Err(SubmitError::Io { .. })));
  }
}
