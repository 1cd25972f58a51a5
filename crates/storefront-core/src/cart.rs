//! Shopping cart entities.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One line in a cart: a product reference plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: i64,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A user's shopping cart.
///
/// `id` is absent for the empty cart a read returns when the user has never
/// added anything; it is assigned by the store on first write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl Cart {
    /// The empty, not-yet-persisted cart for a user.
    #[must_use]
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            items: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
