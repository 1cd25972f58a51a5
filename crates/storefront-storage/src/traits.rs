//! Store traits for the document store abstraction layer.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StorageError;
use crate::types::StoredDocument;

/// The source-of-truth document store all backends must implement.
///
/// Implementations must be thread-safe (`Send + Sync`); a single handle is
/// shared by every in-flight request. Each operation is independently
/// dispatched, so no client-side mutual exclusion is expected.
///
/// Durability is per document: a mutation that returns `Ok` has committed.
///
/// # Example
///
/// ```ignore
/// use storefront_storage::{DocumentStore, StorageError, StoredDocument};
///
/// async fn require_product(
///     store: &dyn DocumentStore,
///     id: &str,
/// ) -> Result<StoredDocument, StorageError> {
///     store
///         .find_by_id("products", id)
///         .await?
///         .ok_or_else(|| StorageError::not_found("products", id))
/// }
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document into a collection.
    ///
    /// The document must be a JSON object. If it carries no `id` field the
    /// backend generates one; the backend also stamps `createdAt` and
    /// `updatedAt` into the stored content.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a document with the same ID
    /// exists, `StorageError::InvalidDocument` if the payload is not an
    /// object.
    async fn insert(&self, collection: &str, document: &Value)
    -> Result<StoredDocument, StorageError>;

    /// Reads a document by ID.
    ///
    /// Returns `None` if the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for absence.
    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StorageError>;

    /// Reads many documents by ID in a single round trip.
    ///
    /// IDs that do not exist are simply absent from the result; duplicate
    /// IDs in the input are fetched once. Result order is unspecified —
    /// callers that need input order reassemble by ID.
    async fn find_by_ids(
        &self,
        collection: &str,
        ids: &[String],
    ) -> Result<Vec<StoredDocument>, StorageError>;

    /// Reads every document in a collection.
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredDocument>, StorageError>;

    /// Reads every document whose top-level `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredDocument>, StorageError>;

    /// Merges `changes` into an existing document.
    ///
    /// Only the top-level fields present in `changes` are replaced; the `id`
    /// field cannot be changed. Returns `None` when the document does not
    /// exist — absence is a value here, not a failure.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidDocument` if `changes` is not an object.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        changes: &Value,
    ) -> Result<Option<StoredDocument>, StorageError>;

    /// Deletes a document by ID.
    ///
    /// Returns `false` when the document did not exist.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StorageError>;

    /// Returns the name of this backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
