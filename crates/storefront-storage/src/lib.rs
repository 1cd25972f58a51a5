//! # storefront-storage
//!
//! Document store abstraction layer for the storefront backend.
//!
//! This crate defines the traits and types that storage backends implement.
//! It does not contain any implementations — those live in separate crates
//! (see `storefront-db-memory`).
//!
//! ## Overview
//!
//! The main trait is [`DocumentStore`], which defines the contract for:
//! - point and batched reads (`find_by_id`, `find_by_ids`)
//! - collection and equality scans (`find_all`, `find_by_field`)
//! - mutations (`insert`, `update`, `delete`)
//!
//! The batched read is what the loader layer builds on: one `find_by_ids`
//! call per batch window, regardless of how many callers asked.

mod error;
mod traits;
mod types;

pub use error::{ErrorCategory, StorageError};
pub use traits::DocumentStore;
pub use types::StoredDocument;

/// Type alias for a store result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared store trait object.
pub type DynStore = std::sync::Arc<dyn DocumentStore>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use storefront_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError};
    pub use crate::traits::DocumentStore;
    pub use crate::types::StoredDocument;
    pub use crate::{DynStore, StorageResult};
}
