use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use time::OffsetDateTime;

use storefront_core::{format_rfc3339, generate_id};
use storefront_storage::{DocumentStore, StorageError, StoredDocument};

/// Key format: "collection/id".
type StoreKey = String;

fn make_store_key(collection: &str, id: &str) -> StoreKey {
    format!("{collection}/{id}")
}

/// In-memory document store backend over a concurrent map.
///
/// Used by tests, seeding and local development. Mutations are atomic per
/// document; `insert` stamps `id`, `createdAt` and `updatedAt` into the
/// stored content the way the document database backend does.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: DashMap<StoreKey, StoredDocument>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn stamp(timestamp: OffsetDateTime) -> Result<Value, StorageError> {
        let formatted = format_rfc3339(timestamp)
            .map_err(|err| StorageError::internal(format!("timestamp formatting: {err}")))?;
        Ok(Value::String(formatted))
    }

    fn collect_sorted(&self, mut docs: Vec<StoredDocument>) -> Vec<StoredDocument> {
        docs.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        docs
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert(
        &self,
        collection: &str,
        document: &Value,
    ) -> Result<StoredDocument, StorageError> {
        let Some(base) = document.as_object() else {
            return Err(StorageError::invalid_document(
                "insert payload must be a JSON object",
            ));
        };

        let id = base
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(generate_id);

        let now = OffsetDateTime::now_utc();
        let mut content = base.clone();
        content.insert("id".to_string(), Value::String(id.clone()));
        content.insert("createdAt".to_string(), Self::stamp(now)?);
        content.insert("updatedAt".to_string(), Self::stamp(now)?);

        let stored = StoredDocument {
            id: id.clone(),
            collection: collection.to_string(),
            document: Value::Object(content),
            created_at: now,
            updated_at: now,
        };

        match self.data.entry(make_store_key(collection, &id)) {
            Entry::Occupied(_) => Err(StorageError::already_exists(collection, id)),
            Entry::Vacant(slot) => {
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StorageError> {
        let key = make_store_key(collection, id);
        Ok(self.data.get(&key).map(|entry| entry.clone()))
    }

    async fn find_by_ids(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<StoredDocument>, StorageError> {
        let mut seen = HashSet::new();
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.as_str()) {
                continue;
            }
            let key = make_store_key(collection, id);
            if let Some(entry) = self.data.get(&key) {
                found.push(entry.clone());
            }
        }
        Ok(found)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StorageError> {
        let prefix = format!("{collection}/");
        let docs = self
            .data
            .iter()
            .filter(|entry| entry.key().starts_with(&prefix))
            .map(|entry| entry.value().clone())
            .collect();
        Ok(self.collect_sorted(docs))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>, StorageError> {
        let prefix = format!("{collection}/");
        let docs = self
            .data
            .iter()
            .filter(|entry| {
                entry.key().starts_with(&prefix) && entry.value().document.get(field) == Some(value)
            })
            .map(|entry| entry.value().clone())
            .collect();
        Ok(self.collect_sorted(docs))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        changes: &Value,
    ) -> Result<Option<StoredDocument>, StorageError> {
        let Some(changed_fields) = changes.as_object() else {
            return Err(StorageError::invalid_document(
                "update payload must be a JSON object",
            ));
        };

        let key = make_store_key(collection, id);
        let Some(mut entry) = self.data.get_mut(&key) else {
            return Ok(None);
        };

        let now = OffsetDateTime::now_utc();
        let stamp = Self::stamp(now)?;
        let Some(content) = entry.document.as_object_mut() else {
            return Err(StorageError::internal(format!(
                "stored document {collection}/{id} is not an object"
            )));
        };
        for (field, value) in changed_fields {
            if field == "id" {
                continue;
            }
            content.insert(field.clone(), value.clone());
        }
        content.insert("updatedAt".to_string(), stamp);
        entry.updated_at = now;

        Ok(Some(entry.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StorageError> {
        let key = make_store_key(collection, id);
        Ok(self.data.remove(&key).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
