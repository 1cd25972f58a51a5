//! # storefront-core
//!
//! Core entity types and utilities shared across the storefront backend:
//! products, carts, orders, ID generation and RFC 3339 timestamp handling.
//!
//! Entities are plain serde types; everywhere else in the workspace they
//! travel as opaque `serde_json::Value` documents with a stable `id` field,
//! so this crate is the only place that knows their shape.

pub mod cart;
pub mod error;
pub mod id;
pub mod order;
pub mod product;
pub mod time;

pub use cart::{Cart, CartItem};
pub use error::{CoreError, Result};
pub use id::generate_id;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, ProductInput, ProductPatch};
pub use time::{format_rfc3339, now_utc, parse_rfc3339};
