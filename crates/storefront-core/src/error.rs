use thiserror::Error;

/// Core error types for storefront operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeParseError(#[from] time::error::Parse),

    #[error("Time formatting error: {0}")]
    TimeFormatError(#[from] time::error::Format),

    #[error("Invalid entity data: {message}")]
    InvalidEntity { message: String },
}

impl CoreError {
    /// Create a new InvalidId error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// Create a new InvalidTimestamp error
    pub fn invalid_timestamp(message: impl Into<String>) -> Self {
        Self::InvalidTimestamp(message.into())
    }

    /// Create a new InvalidEntity error
    pub fn invalid_entity(message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            message: message.into(),
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_id("not-a-uuid");
        assert_eq!(err.to_string(), "Invalid ID: not-a-uuid");

        let err = CoreError::invalid_entity("missing name");
        assert_eq!(err.to_string(), "Invalid entity data: missing name");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::JsonError(_)));
    }
}
