//! Cache tier trait.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// A TTL key/value cache client (GET / MGET / SET EX / DEL).
///
/// Implementations must be thread-safe (`Send + Sync`); one handle is shared
/// process-wide by every in-flight request. Values are opaque serialized
/// records — the cache never interprets them.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Reads a single value. Returns `None` for absent or expired keys.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Reads many values in one round trip.
    ///
    /// The result has the same length and order as `keys`; absent or expired
    /// entries are `None`.
    async fn mget(&self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>, CacheError>;

    /// Writes a value, overwriting any previous one (idempotent).
    ///
    /// `ttl` of `None` means no expiry; callers in this workspace always
    /// pass a bounded TTL.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>)
    -> Result<(), CacheError>;

    /// Deletes a key. Deleting an absent key is a no-op success (`false`).
    async fn del(&self, key: &str) -> Result<bool, CacheError>;
}

/// Type alias for a shared cache trait object.
pub type DynCache = std::sync::Arc<dyn KeyValueCache>;
