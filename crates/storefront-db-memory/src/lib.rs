//! # storefront-db-memory
//!
//! In-memory [`DocumentStore`](storefront_storage::DocumentStore) backend
//! over a concurrent map. This is the backend the test suites and local
//! development run against; it stamps `id`/`createdAt`/`updatedAt` the way a
//! document database backend would, so the loader and service layers cannot
//! tell the difference.

mod store;

pub use store::InMemoryStore;
