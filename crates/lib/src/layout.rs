//! Candy machine v2 account layout.
//!
//! The availability bitmap sits behind a fixed header and the config line
//! array. The header is a sequence of fixed-width fields; its total size is
//! computed here from the individual fields so a new layout version only
//! needs this module touched.
//!
//! ```text
//! [ header: CONFIG_ARRAY_START_V2 ]
//! [ u32 line count ][ CONFIG_LINE_SIZE_V2 * n config lines ]
//! [ u32 ][ floor(n / 8) bytes ][ u32 ]
//! [ bitmap: ceil(n / 8) bytes, MSB first ]
//! ```

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_CREATOR_LIMIT: usize = 5;
/// Pubkey + verified flag + share.
pub const MAX_CREATOR_LEN: usize = 32 + 1 + 1;

/// Size of the length prefix in front of every borsh vector or string.
pub const LEN_PREFIX: usize = 4;

/// Byte offset of the config line array inside a v2 candy machine account.
pub const CONFIG_ARRAY_START_V2: usize = 8 // account discriminator
  + 32 // authority
  + 32 // wallet
  + 33 // optional token mint
  + LEN_PREFIX + 6 // uuid
  + 8 // price
  + 8 // items available
  + 9 // optional go live date
  + 10 // optional end settings
  + LEN_PREFIX + MAX_SYMBOL_LENGTH
  + 2 // seller fee basis points
  + LEN_PREFIX + MAX_CREATOR_LIMIT * MAX_CREATOR_LEN
  + 8 // max supply
  + 1 // is mutable
  + 1 // retain authority
  + 1 // optional hidden settings
  + LEN_PREFIX + MAX_NAME_LENGTH
  + LEN_PREFIX + MAX_URI_LENGTH
  + 32 // hash
  + 4 // max number of lines
  + 8 // items redeemed
  + 1 // optional whitelist settings
  + 1 // whitelist mint mode
  + 1 // presale
  + 9 // optional discount price
  + 32 // whitelist mint
  + 1 // optional gatekeeper
  + 32 // gatekeeper network
  + 1; // expire on use

/// Size of one config line: name and uri, each length-prefixed.
pub const CONFIG_LINE_SIZE_V2: usize = LEN_PREFIX + MAX_NAME_LENGTH + LEN_PREFIX + MAX_URI_LENGTH;

/// Byte offset where the availability bitmap starts for `item_count` items.
pub const fn bitmap_offset(item_count: usize) -> usize {
  CONFIG_ARRAY_START_V2 + 4 + CONFIG_LINE_SIZE_V2 * item_count + 4 + item_count / 8 + 4
}

/// Number of bytes needed to hold one bit per item.
pub const fn bitmap_len(item_count: usize) -> usize {
  item_count.div_ceil(8)
}
