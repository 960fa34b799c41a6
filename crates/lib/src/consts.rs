//! Shared constants for candysync.

use std::num::NonZeroUsize;
use std::time::Duration;

/// Default number of metadata updates submitted per transaction (10).
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

/// Delay before each batch submission.
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Cooldown between runs in long-running mode.
pub const DEFAULT_SIGNING_INTERVAL: Duration = Duration::from_secs(60);
