//! Data types used by the document store traits.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// A document as stored in a backend collection.
///
/// `document` is the full JSON content, including the `id` field and the
/// `createdAt`/`updatedAt` stamps the backend maintains. The envelope fields
/// mirror them for callers that do not want to reach into the JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// The document ID.
    pub id: String,
    /// The collection this document belongs to.
    pub collection: String,
    /// The full document content as JSON.
    pub document: Value,
    /// When the document was last updated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// When the document was originally created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl StoredDocument {
    /// Creates a new `StoredDocument` stamped with the current time.
    #[must_use]
    pub fn new(id: impl Into<String>, collection: impl Into<String>, document: Value) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: id.into(),
            collection: collection.into(),
            document,
            updated_at: now,
            created_at: now,
        }
    }

    /// Returns a string field of the underlying document, if present.
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.document.get(field).and_then(Value::as_str)
    }
}
