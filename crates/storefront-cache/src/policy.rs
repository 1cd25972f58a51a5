//! Cache TTL policy.

use std::time::Duration;

use serde::Deserialize;

/// Default TTL for read-path backfills (item and collection keys).
pub const DEFAULT_READ_TTL_SECS: u64 = 300;

/// Default TTL for write-through refresh entries.
///
/// Shorter than the read TTL: refresh entries are written inside the known
/// commit/invalidate race window, so they get the tighter staleness bound.
pub const DEFAULT_REFRESH_TTL_SECS: u64 = 60;

/// TTL policy for cached records.
///
/// Every cache write in the workspace carries one of these two bounded TTLs;
/// unbounded entries are never produced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    /// TTL in seconds for entries written on the read path.
    pub read_ttl_secs: u64,
    /// TTL in seconds for entries written by the write-through refresh.
    pub refresh_ttl_secs: u64,
    /// Whether an update repopulates the item key with the fresh committed
    /// value after invalidating it. When disabled, updates only invalidate
    /// and the next read is a guaranteed cache miss.
    pub write_through_refresh: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            read_ttl_secs: DEFAULT_READ_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
            write_through_refresh: true,
        }
    }
}

impl CachePolicy {
    /// TTL for read-path backfills.
    #[must_use]
    pub fn read_ttl(&self) -> Duration {
        Duration::from_secs(self.read_ttl_secs)
    }

    /// TTL for write-through refresh entries.
    #[must_use]
    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_ttl_secs)
    }

    /// Policy with write-through refresh disabled (invalidate-only updates).
    #[must_use]
    pub fn invalidate_only(mut self) -> Self {
        self.write_through_refresh = false;
        self
    }
}
