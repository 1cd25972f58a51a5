//! Test doubles shared by the unit tests in this crate.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use storefront_cache::{CacheError, KeyValueCache};
use storefront_db_memory::InMemoryStore;
use storefront_storage::{DocumentStore, StorageError, StoredDocument};

/// Wraps [`InMemoryStore`], recording batched and full reads.
pub(crate) struct CountingStore {
    inner: InMemoryStore,
    batch_calls: Mutex<Vec<Vec<String>>>,
    scan_calls: Mutex<usize>,
}

impl CountingStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: InMemoryStore::new(),
            batch_calls: Mutex::new(Vec::new()),
            scan_calls: Mutex::new(0),
        }
    }

    pub(crate) fn batch_calls(&self) -> Vec<Vec<String>> {
        self.batch_calls.lock().unwrap().clone()
    }

    pub(crate) fn scan_calls(&self) -> usize {
        *self.scan_calls.lock().unwrap()
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn insert(
        &self,
        collection: &str,
        document: &Value,
    ) -> Result<StoredDocument, StorageError> {
        self.inner.insert(collection, document).await
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StorageError> {
        self.inner.find_by_id(collection, id).await
    }

    async fn find_by_ids(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<StoredDocument>, StorageError> {
        self.batch_calls.lock().unwrap().push(ids.to_vec());
        self.inner.find_by_ids(collection, ids).await
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StorageError> {
        *self.scan_calls.lock().unwrap() += 1;
        self.inner.find_all(collection).await
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        self.inner.find_by_field(collection, field, value).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        changes: &Value,
    ) -> Result<Option<StoredDocument>, StorageError> {
        self.inner.update(collection, id, changes).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StorageError> {
        self.inner.delete(collection, id).await
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}

/// A store whose every read fails with a connection error.
pub(crate) struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert(
        &self,
        _collection: &str,
        _document: &Value,
    ) -> Result<StoredDocument, StorageError> {
        Err(StorageError::connection("store down"))
    }

    async fn find_by_id(
        &self,
        _collection: &str,
        _id: &str,
    ) -> Result<Option<StoredDocument>, StorageError> {
        Err(StorageError::connection("store down"))
    }

    async fn find_by_ids(
        &self,
        _collection: &str,
        _ids: &[String],
    ) -> Result<Vec<StoredDocument>, StorageError> {
        Err(StorageError::connection("store down"))
    }

    async fn find_all(&self, _collection: &str) -> Result<Vec<StoredDocument>, StorageError> {
        Err(StorageError::connection("store down"))
    }

    async fn find_by_field(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        Err(StorageError::connection("store down"))
    }

    async fn update(
        &self,
        _collection: &str,
        _id: &str,
        _changes: &Value,
    ) -> Result<Option<StoredDocument>, StorageError> {
        Err(StorageError::connection("store down"))
    }

    async fn delete(&self, _collection: &str, _id: &str) -> Result<bool, StorageError> {
        Err(StorageError::connection("store down"))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// A cache whose every operation fails with a connection error.
pub(crate) struct FailingCache;

#[async_trait]
impl KeyValueCache for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::connection("cache down"))
    }

    async fn mget(&self, _keys: &[String]) -> Result<Vec<Option<Vec<u8>>>, CacheError> {
        Err(CacheError::connection("cache down"))
    }

    async fn set(
        &self,
        _key: &str,
        _value: Vec<u8>,
        _ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        Err(CacheError::connection("cache down"))
    }

    async fn del(&self, _key: &str) -> Result<bool, CacheError> {
        Err(CacheError::connection("cache down"))
    }
}
