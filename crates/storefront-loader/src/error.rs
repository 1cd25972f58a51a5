//! Loader error types.
//!
//! A batch failure is delivered to every waiter that joined the batch, so
//! [`LoadError`] must be `Clone`. Store errors are wrapped in an `Arc` to
//! keep cloning cheap while preserving the original error for inspection.

use std::sync::Arc;

use storefront_storage::StorageError;

/// Errors surfaced to callers of the batching and caching layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// The backing document store failed while serving the batch.
    #[error("store error: {0}")]
    Store(Arc<StorageError>),

    /// The batch machinery itself failed (dropped channel, size mismatch).
    #[error("batch error: {message}")]
    Batch {
        /// Description of the batching failure.
        message: String,
    },
}

impl LoadError {
    /// Creates a new `Batch` error.
    #[must_use]
    pub fn batch(message: impl Into<String>) -> Self {
        Self::Batch {
            message: message.into(),
        }
    }

    /// Returns `true` if this error originated in the document store.
    #[must_use]
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl From<StorageError> for LoadError {
    fn from(err: StorageError) -> Self {
        Self::Store(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_wraps_and_clones() {
        let err: LoadError = StorageError::connection("pool exhausted").into();
        let cloned = err.clone();

        assert!(err.is_store());
        assert_eq!(err.to_string(), cloned.to_string());
        assert!(err.to_string().contains("pool exhausted"));
    }

    #[test]
    fn test_batch_error_display() {
        let err = LoadError::batch("batch channel dropped");
        assert_eq!(err.to_string(), "batch error: batch channel dropped");
        assert!(!err.is_store());
    }
}
