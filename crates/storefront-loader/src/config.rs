//! Loader configuration.

use std::time::Duration;

use serde::Deserialize;
use storefront_cache::CachePolicy;

/// Default scheduling window for batch collection, in milliseconds.
pub const DEFAULT_BATCH_WINDOW_MS: u64 = 1;

/// Default number of concurrent background cache backfill tasks.
pub const DEFAULT_BACKFILL_CONCURRENCY: usize = 8;

/// Configuration for the batching and caching layer.
///
/// All fields have working defaults, so a `[loader]` section in the config
/// file can set any subset of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Length of the batch scheduling window in milliseconds. Loads arriving
    /// within the same window are coalesced into one store fetch.
    pub batch_window_ms: u64,
    /// Maximum number of cache backfill writes running concurrently.
    pub backfill_concurrency: usize,
    /// TTL policy applied to every cache write.
    pub cache_policy: CachePolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_window_ms: DEFAULT_BATCH_WINDOW_MS,
            backfill_concurrency: DEFAULT_BACKFILL_CONCURRENCY,
            cache_policy: CachePolicy::default(),
        }
    }
}

impl LoaderConfig {
    /// The batch scheduling window as a [`Duration`].
    #[must_use]
    pub fn batch_window(&self) -> Duration {
        Duration::from_millis(self.batch_window_ms)
    }
}
