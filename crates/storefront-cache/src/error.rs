//! Cache tier error types.
//!
//! Cache failures are best-effort by contract: the coordinator treats every
//! variant here as a forced miss, logs it and moves on. Nothing above the
//! coordinator ever sees a `CacheError`.

/// Errors that can occur during cache tier operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Failed to reach the cache backend.
    #[error("Cache connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// A cache operation timed out.
    #[error("Cache timeout: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },

    /// A cached record could not be serialized or deserialized.
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal cache error occurred.
    #[error("Internal cache error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl CacheError {
    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Timeout` error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a connectivity failure.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::connection("refused");
        assert_eq!(err.to_string(), "Cache connection error: refused");
        assert!(err.is_connection());

        let err = CacheError::timeout("2s elapsed");
        assert_eq!(err.to_string(), "Cache timeout: 2s elapsed");
        assert!(!err.is_connection());
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_slice::<serde_json::Value>(b"{oops").unwrap_err();
        let err: CacheError = json_err.into();
        assert!(matches!(err, CacheError::Serialization(_)));
    }
}
