//! Domain services for the storefront backend.
//!
//! Wires the document store, the cache tier and the batching layer into the
//! three storefront services:
//!
//! - [`ProductService`] — the cached, batched catalog.
//! - [`CartService`] — per-user carts with merge-on-add semantics.
//! - [`OrderService`] — checkout, pricing cart lines from the catalog.
//!
//! Plus [`Settings`] for TOML configuration and [`seed_products`] for the
//! sample catalog.

mod carts;
mod error;
mod orders;
mod products;
mod seed;
mod settings;

pub use carts::{CARTS, CartService, ResolvedCart, ResolvedItem};
pub use error::ServiceError;
pub use orders::{ORDERS, OrderService, ResolvedOrder};
pub use products::{PRODUCTS, ProductService};
pub use seed::{sample_products, seed_products};
pub use settings::Settings;
