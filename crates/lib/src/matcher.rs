//! Join changed links against fetched metadata records.

use crate::cache::LinkDiff;
use crate::ledger::OnChainRecord;

/// Keep the records whose uri is an old link in `diff`.
///
/// Matching is exact string equality. Fetch order is preserved.
pub fn match_records(records: Vec<OnChainRecord>, diff: &LinkDiff) -> Vec<OnChainRecord> {
  if diff.is_empty() {
    return Vec::new();
  }
  records.into_iter().filter(|record| diff.contains(record.uri())).collect()
}
