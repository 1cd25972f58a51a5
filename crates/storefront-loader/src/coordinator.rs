//! Cache-aside coordination between the cache tier and the document store.
//!
//! The coordinator owns the read path for one collection: deduplicate the
//! requested IDs, probe the cache in one `MGET`, fetch every miss from the
//! store in one batched call, backfill the cache in the background and
//! reassemble the response in input order. Cache failures are never fatal —
//! they degrade into store reads.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexSet;
use serde_json::Value;
use storefront_cache::{CachePolicy, DynCache, Keyspace};
use storefront_storage::DynStore;
use tokio::sync::Semaphore;
use tracing::{debug, instrument, warn};

use crate::batch::BatchFetch;
use crate::config::LoaderConfig;
use crate::error::LoadError;

/// Cache-aside read coordinator for one collection.
pub struct CacheCoordinator {
    store: DynStore,
    cache: DynCache,
    collection: String,
    keyspace: Keyspace,
    policy: CachePolicy,
    backfill: Arc<Semaphore>,
}

impl CacheCoordinator {
    /// Creates a coordinator for `collection` using `keyspace` for cache keys.
    #[must_use]
    pub fn new(
        store: DynStore,
        cache: DynCache,
        collection: impl Into<String>,
        keyspace: Keyspace,
        config: &LoaderConfig,
    ) -> Self {
        Self {
            store,
            cache,
            collection: collection.into(),
            keyspace,
            policy: config.cache_policy.clone(),
            backfill: Arc::new(Semaphore::new(config.backfill_concurrency.max(1))),
        }
    }

    /// Reads many records by ID, preserving input order and multiplicity.
    ///
    /// Distinct IDs are probed in the cache with one `MGET`; all misses go to
    /// the store in one batched fetch. Fetched records are written back to
    /// the cache by bounded background tasks, off the request path.
    ///
    /// # Errors
    ///
    /// Fails only when the store fetch for the misses fails. Cache errors
    /// and corrupt cache entries are logged and treated as misses.
    #[instrument(skip(self), fields(collection = %self.collection, ids = ids.len()))]
    pub async fn get_many(&self, ids: &[String]) -> Result<Vec<Option<Value>>, LoadError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let distinct: IndexSet<&String> = ids.iter().collect();
        let item_keys: Vec<String> = distinct.iter().map(|id| self.keyspace.item_key(id)).collect();

        let cached = match self.cache.mget(&item_keys).await {
            Ok(values) if values.len() == item_keys.len() => values,
            Ok(values) => {
                warn!(
                    expected = item_keys.len(),
                    got = values.len(),
                    "cache mget returned wrong number of values, treating all as misses"
                );
                vec![None; item_keys.len()]
            }
            Err(err) => {
                warn!(error = %err, "cache mget failed, treating all as misses");
                vec![None; item_keys.len()]
            }
        };

        let mut found: HashMap<String, Value> = HashMap::with_capacity(distinct.len());
        let mut misses: Vec<String> = Vec::new();
        for (id, bytes) in distinct.iter().zip(cached) {
            match bytes {
                Some(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                    Ok(value) => {
                        found.insert((*id).clone(), value);
                    }
                    Err(err) => {
                        warn!(id = %id, error = %err, "corrupt cache entry, refetching");
                        misses.push((*id).clone());
                    }
                },
                None => misses.push((*id).clone()),
            }
        }

        if !misses.is_empty() {
            debug!(
                hits = found.len(),
                misses = misses.len(),
                "cache partition complete"
            );
            let documents = self.store.find_by_ids(&self.collection, &misses).await?;
            for doc in documents {
                self.spawn_backfill(&doc.id, doc.document.clone());
                found.insert(doc.id, doc.document);
            }
        }

        Ok(ids.iter().map(|id| found.get(id).cloned()).collect())
    }

    /// Reads the whole collection through the coarse collection-level key.
    ///
    /// # Errors
    ///
    /// Fails only when the store scan fails on a cache miss.
    #[instrument(skip(self), fields(collection = %self.collection))]
    pub async fn get_all(&self) -> Result<Vec<Value>, LoadError> {
        match self.cache.get(self.keyspace.collection_key()).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Value>>(&bytes) {
                Ok(values) => return Ok(values),
                Err(err) => {
                    warn!(error = %err, "corrupt collection cache entry, refetching");
                }
            },
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache get failed, falling through to store");
            }
        }

        let documents = self.store.find_all(&self.collection).await?;
        let values: Vec<Value> = documents.into_iter().map(|doc| doc.document).collect();

        match serde_json::to_vec(&values) {
            Ok(bytes) => {
                let ttl = Some(self.policy.read_ttl());
                if let Err(err) = self
                    .cache
                    .set(self.keyspace.collection_key(), bytes, ttl)
                    .await
                {
                    warn!(error = %err, "collection cache backfill failed");
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to serialize collection for caching");
            }
        }

        Ok(values)
    }

    fn spawn_backfill(&self, id: &str, value: Value) {
        let key = self.keyspace.item_key(id);
        let cache = Arc::clone(&self.cache);
        let ttl = self.policy.read_ttl();
        let semaphore = Arc::clone(&self.backfill);
        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire().await else {
                return;
            };
            let bytes = match serde_json::to_vec(&value) {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(key = %key, error = %err, "failed to serialize record for backfill");
                    return;
                }
            };
            if let Err(err) = cache.set(&key, bytes, Some(ttl)).await {
                warn!(key = %key, error = %err, "cache backfill failed");
            }
        });
    }
}

#[async_trait]
impl BatchFetch for CacheCoordinator {
    async fn fetch_batch(&self, keys: &[String]) -> Result<Vec<Option<Value>>, LoadError> {
        self.get_many(keys).await
    }
}
