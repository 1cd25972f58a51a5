//! Cache tier for the storefront workspace.
//!
//! This crate defines the [`KeyValueCache`] trait (GET / MGET / SET EX / DEL
//! against opaque serialized values), the [`Keyspace`] layout that maps
//! documents to cache keys, the [`CachePolicy`] TTL rules, and an in-memory
//! backend with lazy TTL expiry for tests and single-process deployments.
//!
//! The cache is best-effort throughout: callers treat every [`CacheError`]
//! as a miss and fall through to the document store.

mod error;
mod keyspace;
mod memory;
mod policy;
mod traits;

pub use error::CacheError;
pub use keyspace::Keyspace;
pub use memory::InMemoryCache;
pub use policy::{CachePolicy, DEFAULT_READ_TTL_SECS, DEFAULT_REFRESH_TTL_SECS};
pub use traits::{DynCache, KeyValueCache};
