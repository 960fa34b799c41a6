//! Reading and writing cache files.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{CacheError, CacheSnapshot};

/// Load and validate a cache file.
pub fn load_cache(path: &Path) -> Result<CacheSnapshot, CacheError> {
  let content = fs::read_to_string(path).map_err(|source| CacheError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let cache = CacheSnapshot::from_json_str(&content)?;
  debug!(path = %path.display(), items = cache.len(), "loaded cache");
  Ok(cache)
}

/// Write a cache file.
///
/// Uses atomic write (write to temp, then rename) so a crash never leaves a
/// half-written cache behind.
pub fn save_cache(path: &Path, cache: &CacheSnapshot) -> Result<(), CacheError> {
  let content = cache.to_json_string()?;
  let write_err = |source| CacheError::Write {
    path: path.to_path_buf(),
    source,
  };

  let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
  temp_name.push(".tmp");
  let temp_path = path.with_file_name(temp_name);

  fs::write(&temp_path, &content).map_err(write_err)?;
  fs::rename(&temp_path, path).map_err(write_err)?;

  debug!(path = %path.display(), items = cache.len(), "saved cache");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::ItemRecord;
  use tempfile::TempDir;

  #[test]
  fn save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("devnet-temp.json");

    let cache = CacheSnapshot::from_items(vec![ItemRecord::new("https://a"), ItemRecord::new("https://b")]);
    save_cache(&path, &cache).unwrap();

    let loaded = load_cache(&path).unwrap();
    assert_eq!(loaded, cache);
    assert!(!temp_dir.path().join("devnet-temp.json.tmp").exists());
  }

  #[test]
  fn load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_cache(&temp_dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CacheError::Read { .. }));
  }

  #[test]
  fn load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_cache(&path).unwrap_err();
    assert!(matches!(err, CacheError::Parse(_)));
  }
}
