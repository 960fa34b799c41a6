use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize, de};
use serde_json::{Map, Value};
use thiserror::Error;

/// Which of the two snapshots a record was expected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSide {
  Current,
  Candidate,
}

impl fmt::Display for SnapshotSide {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SnapshotSide::Current => write!(f, "current"),
      SnapshotSide::Candidate => write!(f, "candidate"),
    }
  }
}

/// Errors loading, validating or diffing cache snapshots.
#[derive(Debug, Error)]
pub enum CacheError {
  #[error("failed to read cache {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write cache {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse cache: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize cache: {0}")]
  Serialize(#[source] serde_json::Error),

  /// An `items` key is not a non-negative integer.
  #[error("invalid item index {0:?}")]
  InvalidIndex(String),

  /// Item keys must cover `0..n` without gaps.
  #[error("cache has {count} items but index {missing} is absent")]
  NotDense { count: usize, missing: usize },

  /// The two snapshots are not aligned.
  #[error("item {index} missing from {side} cache")]
  MissingItem { index: usize, side: SnapshotSide },
}

/// One item of the cache.
///
/// Only `link` takes part in diffing. Every other field, `creators` included,
/// is kept as read and written back in its original position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ItemRecord {
  pub link: String,
  pub extra: Map<String, Value>,
  link_slot: usize,
}

impl ItemRecord {
  pub fn new(link: impl Into<String>) -> Self {
    Self {
      link: link.into(),
      extra: Map::new(),
      link_slot: 0,
    }
  }
}

impl TryFrom<Map<String, Value>> for ItemRecord {
  type Error = String;

  fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
    let link_slot = fields
      .keys()
      .position(|key| key == "link")
      .ok_or_else(|| "missing field `link`".to_string())?;
    let Some(Value::String(link)) = fields.shift_remove("link") else {
      return Err("field `link` must be a string".to_string());
    };
    Ok(Self {
      link,
      extra: fields,
      link_slot,
    })
  }
}

impl From<ItemRecord> for Map<String, Value> {
  fn from(record: ItemRecord) -> Self {
    let mut fields = Map::with_capacity(record.extra.len() + 1);
    let mut link = Some(Value::String(record.link));
    for (position, (key, value)) in record.extra.into_iter().enumerate() {
      if position == record.link_slot {
        if let Some(link) = link.take() {
          fields.insert("link".to_string(), link);
        }
      }
      fields.insert(key, value);
    }
    if let Some(link) = link {
      fields.insert("link".to_string(), link);
    }
    fields
  }
}

/// A validated cache: items are dense and addressed by position.
///
/// The parsed top-level document is kept so that keys other than `items`
/// keep their values and order when the cache is written back.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheSnapshot {
  items: Vec<ItemRecord>,
  document: Map<String, Value>,
}

impl CacheSnapshot {
  pub fn from_items(items: Vec<ItemRecord>) -> Self {
    Self {
      items,
      document: Map::new(),
    }
  }

  /// Parse and validate a cache document.
  pub fn from_json_str(content: &str) -> Result<Self, CacheError> {
    let mut document: Map<String, Value> = serde_json::from_str(content).map_err(CacheError::Parse)?;
    let raw_items = match document.get_mut("items") {
      Some(Value::Object(items)) => std::mem::take(items),
      Some(_) => return Err(CacheError::Parse(de::Error::custom("`items` must be an object"))),
      None => return Err(CacheError::Parse(de::Error::missing_field("items"))),
    };

    let mut indexed = BTreeMap::new();
    for (key, value) in raw_items {
      let index: usize = key.parse().map_err(|_| CacheError::InvalidIndex(key.clone()))?;
      indexed.insert(index, value);
    }

    let count = indexed.len();
    let mut items = Vec::with_capacity(count);
    for (expected, (index, value)) in indexed.into_iter().enumerate() {
      if index != expected {
        return Err(CacheError::NotDense {
          count,
          missing: expected,
        });
      }
      items.push(serde_json::from_value(value).map_err(CacheError::Parse)?);
    }

    Ok(Self { items, document })
  }

  /// Serialize back to the cache document shape.
  ///
  /// Items are written in index order; everything else keeps the order it
  /// was read in.
  pub fn to_json_string(&self) -> Result<String, CacheError> {
    let mut items = Map::with_capacity(self.items.len());
    for (index, item) in self.items.iter().enumerate() {
      items.insert(index.to_string(), Value::Object(item.clone().into()));
    }
    let mut document = self.document.clone();
    document.insert("items".to_string(), Value::Object(items));
    serde_json::to_string_pretty(&document).map_err(CacheError::Serialize)
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&ItemRecord> {
    self.items.get(index)
  }

  pub fn get_mut(&mut self, index: usize) -> Option<&mut ItemRecord> {
    self.items.get_mut(index)
  }

  pub fn items(&self) -> &[ItemRecord] {
    &self.items
  }
}
