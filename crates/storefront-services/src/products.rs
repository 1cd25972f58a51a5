//! Product catalog service.
//!
//! All reads go through the batching and caching layer; all writes go to
//! the store first and invalidate the cache after the commit.

use std::sync::Arc;

use storefront_cache::{DynCache, Keyspace};
use storefront_core::{Product, ProductInput, ProductPatch};
use storefront_loader::{BatchLoader, CacheCoordinator, Invalidator, LoaderConfig};
use storefront_storage::DynStore;
use tracing::{info, instrument};

use crate::error::ServiceError;

/// Collection name for the product catalog.
pub const PRODUCTS: &str = "products";

/// Product catalog service.
pub struct ProductService {
    store: DynStore,
    coordinator: Arc<CacheCoordinator>,
    loader: BatchLoader<Arc<CacheCoordinator>>,
    invalidator: Invalidator,
}

impl ProductService {
    /// Wires the product read path and invalidation hooks.
    #[must_use]
    pub fn new(store: DynStore, cache: DynCache, config: &LoaderConfig) -> Self {
        let keyspace = Keyspace::products();
        let coordinator = Arc::new(CacheCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&cache),
            PRODUCTS,
            keyspace.clone(),
            config,
        ));
        let loader = BatchLoader::new(Arc::clone(&coordinator), config.batch_window());
        let invalidator = Invalidator::new(cache, keyspace, config.cache_policy.clone());
        Self {
            store,
            coordinator,
            loader,
            invalidator,
        }
    }

    /// Lists the whole catalog through the collection-level cache key.
    ///
    /// # Errors
    ///
    /// Fails when the store scan fails or a stored record is malformed.
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let values = self.coordinator.get_all().await?;
        values
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(ServiceError::from))
            .collect()
    }

    /// Reads one product, batched with concurrent lookups.
    ///
    /// # Errors
    ///
    /// Fails when the batched store fetch fails or the record is malformed.
    pub async fn get(&self, id: &str) -> Result<Option<Product>, ServiceError> {
        let value = self.loader.load(id).await?;
        Ok(value.map(serde_json::from_value).transpose()?)
    }

    /// Reads many products, preserving input order and multiplicity.
    ///
    /// # Errors
    ///
    /// Fails when the batched store fetch fails or a record is malformed.
    pub async fn get_many(&self, ids: &[String]) -> Result<Vec<Option<Product>>, ServiceError> {
        let values = self.loader.load_many(ids).await?;
        values
            .into_iter()
            .map(|value| {
                value
                    .map(serde_json::from_value)
                    .transpose()
                    .map_err(ServiceError::from)
            })
            .collect()
    }

    /// Creates a product, then drops the collection-level cache key.
    ///
    /// # Errors
    ///
    /// Fails when the store insert fails. Invalidation failures are logged
    /// and absorbed.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let document = serde_json::to_value(&input)?;
        let stored = self.store.insert(PRODUCTS, &document).await?;
        self.invalidator.on_create().await;
        info!(id = %stored.id, "product created");
        Ok(serde_json::from_value(stored.document)?)
    }

    /// Applies a partial update, then invalidates and optionally refreshes
    /// the item's cache entry.
    ///
    /// Returns `None` when the product does not exist; nothing is
    /// invalidated in that case.
    ///
    /// # Errors
    ///
    /// Fails when the store update fails.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, ServiceError> {
        let changes = serde_json::to_value(&patch)?;
        match self.store.update(PRODUCTS, id, &changes).await? {
            Some(stored) => {
                self.invalidator.on_update(id, &stored.document).await;
                Ok(Some(serde_json::from_value(stored.document)?))
            }
            None => Ok(None),
        }
    }

    /// Deletes a product, then drops its cache entries.
    ///
    /// Returns `false` when the product did not exist.
    ///
    /// # Errors
    ///
    /// Fails when the store delete fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let deleted = self.store.delete(PRODUCTS, id).await?;
        if deleted {
            self.invalidator.on_delete(id).await;
            info!(id, "product deleted");
        }
        Ok(deleted)
    }
}
