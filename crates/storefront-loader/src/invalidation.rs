//! After-commit cache invalidation.
//!
//! Every hook here runs after the store mutation has committed, and every
//! cache failure is swallowed after logging: the TTLs bound how long a
//! stale entry can outlive a missed invalidation.

use serde_json::Value;
use storefront_cache::{CachePolicy, DynCache, Keyspace};
use tracing::{debug, warn};

/// Invalidates cache entries after committed mutations on one collection.
pub struct Invalidator {
    cache: DynCache,
    keyspace: Keyspace,
    policy: CachePolicy,
}

impl Invalidator {
    /// Creates an invalidator for the given keyspace.
    #[must_use]
    pub fn new(cache: DynCache, keyspace: Keyspace, policy: CachePolicy) -> Self {
        Self {
            cache,
            keyspace,
            policy,
        }
    }

    /// Runs after a create has committed.
    ///
    /// Drops the collection-level key; item keys are untouched because a new
    /// record cannot have been cached yet.
    pub async fn on_create(&self) {
        self.del(self.keyspace.collection_key()).await;
    }

    /// Runs after an update has committed.
    ///
    /// Drops the item key and the collection-level key. When write-through
    /// refresh is enabled, the item key is then repopulated with the fresh
    /// committed value under the short refresh TTL.
    pub async fn on_update(&self, id: &str, fresh: &Value) {
        let item_key = self.keyspace.item_key(id);
        self.del(&item_key).await;
        self.del(self.keyspace.collection_key()).await;

        if self.policy.write_through_refresh {
            self.refresh(&item_key, fresh).await;
        }
    }

    /// Runs after a delete has committed.
    ///
    /// Drops both keys and never repopulates anything.
    pub async fn on_delete(&self, id: &str) {
        self.del(&self.keyspace.item_key(id)).await;
        self.del(self.keyspace.collection_key()).await;
    }

    async fn del(&self, key: &str) {
        match self.cache.del(key).await {
            Ok(existed) => debug!(key = %key, existed, "cache key invalidated"),
            Err(err) => warn!(key = %key, error = %err, "cache invalidation failed"),
        }
    }

    async fn refresh(&self, key: &str, fresh: &Value) {
        let bytes = match serde_json::to_vec(fresh) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to serialize refresh value");
                return;
            }
        };
        let ttl = Some(self.policy.refresh_ttl());
        if let Err(err) = self.cache.set(key, bytes, ttl).await {
            warn!(key = %key, error = %err, "write-through refresh failed");
        }
    }
}
