use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::LedgerError;

/// A 32-byte ledger public key, displayed in base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

impl Address {
  pub const fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  pub fn to_base58(&self) -> String {
    bs58::encode(self.0).into_string()
  }
}

impl fmt::Display for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_base58())
  }
}

impl fmt::Debug for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Address({})", self.to_base58())
  }
}

impl FromStr for Address {
  type Err = LedgerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || LedgerError::InvalidAddress(s.to_string());
    let bytes = bs58::decode(s).into_vec().map_err(|_| invalid())?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|_| invalid())?;
    Ok(Self(bytes))
  }
}

impl Serialize for Address {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_base58())
  }
}

impl<'de> Deserialize<'de> for Address {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
  }
}
