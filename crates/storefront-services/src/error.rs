//! Service layer error type.

use storefront_loader::LoadError;
use storefront_storage::StorageError;

/// Errors surfaced by the domain services.
///
/// Absence is not represented here: reads return `Option`/`bool` values and
/// reserve errors for genuine failures.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The document store failed.
    #[error(transparent)]
    Store(#[from] StorageError),

    /// The batching and caching layer failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An entity could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// An order could not be placed.
    #[error("invalid order: {message}")]
    InvalidOrder {
        /// Why the order was rejected.
        message: String,
    },
}

impl ServiceError {
    /// Creates a new `InvalidOrder` error.
    #[must_use]
    pub fn invalid_order(message: impl Into<String>) -> Self {
        Self::InvalidOrder {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an order validation failure.
    #[must_use]
    pub fn is_invalid_order(&self) -> bool {
        matches!(self, Self::InvalidOrder { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_passes_through() {
        let err: ServiceError = StorageError::not_found("products", "p-1").into();
        assert!(matches!(err, ServiceError::Store(_)));
        assert!(!err.is_invalid_order());
    }

    #[test]
    fn test_invalid_order_display() {
        let err = ServiceError::invalid_order("cart is empty");
        assert_eq!(err.to_string(), "invalid order: cart is empty");
        assert!(err.is_invalid_order());
    }
}
