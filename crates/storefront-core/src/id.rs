//! Entity identifier generation.

/// Generates a new opaque entity identifier (UUID v4 as a string).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
