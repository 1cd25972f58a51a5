//! Batching and caching layer for the storefront workspace.
//!
//! Three pieces cooperate on the hot read path:
//!
//! - [`BatchLoader`] coalesces concurrent loads within a short scheduling
//!   window into one [`BatchFetch`] call, deduplicating keys and fanning
//!   results (or one shared error) back out to every waiter.
//! - [`CacheCoordinator`] implements [`BatchFetch`] for one collection:
//!   cache `MGET`, one batched store fetch for the misses, background
//!   backfill, input-order reassembly. It also serves the collection-level
//!   read-through for "list everything".
//! - [`Invalidator`] runs after committed mutations, deleting the affected
//!   cache keys and optionally refreshing an updated record under a short
//!   TTL.
//!
//! The cache is best-effort everywhere: cache failures degrade into store
//! reads, and invalidation failures are logged and swallowed, bounded by
//! the entry TTLs.

mod batch;
mod config;
mod coordinator;
mod error;
mod invalidation;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchFetch, BatchLoader};
pub use config::{DEFAULT_BACKFILL_CONCURRENCY, DEFAULT_BATCH_WINDOW_MS, LoaderConfig};
pub use coordinator::CacheCoordinator;
pub use error::LoadError;
pub use invalidation::Invalidator;
