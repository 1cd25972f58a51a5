//! Shopping cart service.
//!
//! Carts live in the store only; they are never cached. Product data inside
//! a resolved cart is fetched through the product loader, so any number of
//! cart lines costs one batched catalog lookup.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use storefront_core::{Cart, CartItem, Product};
use storefront_storage::{DynStore, StorageError};

use crate::error::ServiceError;
use crate::products::ProductService;

/// Collection name for shopping carts.
pub const CARTS: &str = "carts";

/// A cart line with its product resolved from the catalog.
///
/// `product` is `None` when the referenced product no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItem {
    pub product: Option<Product>,
    pub quantity: i64,
}

/// A cart with every line resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCart {
    pub user_id: String,
    pub items: Vec<ResolvedItem>,
}

/// Shopping cart service.
pub struct CartService {
    store: DynStore,
    products: Arc<ProductService>,
}

impl CartService {
    #[must_use]
    pub fn new(store: DynStore, products: Arc<ProductService>) -> Self {
        Self { store, products }
    }

    /// Reads a user's cart. A user with no stored cart gets an empty one.
    ///
    /// # Errors
    ///
    /// Fails when the store lookup fails or the stored cart is malformed.
    pub async fn get(&self, user_id: &str) -> Result<Cart, ServiceError> {
        let documents = self
            .store
            .find_by_field(CARTS, "userId", &Value::String(user_id.to_string()))
            .await?;
        match documents.into_iter().next() {
            Some(doc) => Ok(serde_json::from_value(doc.document)?),
            None => Ok(Cart::empty(user_id)),
        }
    }

    /// Adds `quantity` units of a product to the user's cart.
    ///
    /// An existing line for the same product is merged by summing the
    /// quantities; the first add creates the cart document.
    ///
    /// # Errors
    ///
    /// Fails when the store write fails.
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i64,
    ) -> Result<Cart, ServiceError> {
        let mut cart = self.get(user_id).await?;
        match cart
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            Some(item) => item.quantity += quantity,
            None => cart.items.push(CartItem::new(product_id, quantity)),
        }

        let stored = match &cart.id {
            Some(id) => {
                let changes = json!({ "items": cart.items });
                let Some(stored) = self.store.update(CARTS, id, &changes).await? else {
                    return Err(StorageError::not_found(CARTS, id).into());
                };
                stored
            }
            None => {
                let document = serde_json::to_value(&cart)?;
                self.store.insert(CARTS, &document).await?
            }
        };
        Ok(serde_json::from_value(stored.document)?)
    }

    /// Reads a user's cart with every line resolved against the catalog.
    ///
    /// # Errors
    ///
    /// Fails when the store lookup or the batched product fetch fails.
    pub async fn get_resolved(&self, user_id: &str) -> Result<ResolvedCart, ServiceError> {
        let cart = self.get(user_id).await?;
        let ids: Vec<String> = cart
            .items
            .iter()
            .map(|item| item.product_id.clone())
            .collect();
        let products = self.products.get_many(&ids).await?;
        let items = cart
            .items
            .iter()
            .zip(products)
            .map(|(item, product)| ResolvedItem {
                product,
                quantity: item.quantity,
            })
            .collect();
        Ok(ResolvedCart {
            user_id: cart.user_id,
            items,
        })
    }

    /// Deletes every stored cart for a user. Returns `false` if there was
    /// none.
    ///
    /// # Errors
    ///
    /// Fails when the store lookup or delete fails.
    pub async fn clear(&self, user_id: &str) -> Result<bool, ServiceError> {
        let documents = self
            .store
            .find_by_field(CARTS, "userId", &Value::String(user_id.to_string()))
            .await?;
        let mut cleared = false;
        for doc in documents {
            cleared |= self.store.delete(CARTS, &doc.id).await?;
        }
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use storefront_cache::InMemoryCache;
    use storefront_core::ProductInput;
    use storefront_db_memory::InMemoryStore;
    use storefront_loader::LoaderConfig;

    use super::*;

    fn services() -> (CartService, Arc<ProductService>) {
        let store: DynStore = Arc::new(InMemoryStore::new());
        let products = Arc::new(ProductService::new(
            Arc::clone(&store),
            Arc::new(InMemoryCache::new()),
            &LoaderConfig::default(),
        ));
        (CartService::new(store, Arc::clone(&products)), products)
    }

    #[tokio::test]
    async fn test_missing_cart_reads_as_empty() {
        let (carts, _products) = services();
        let cart = carts.get("user-1").await.unwrap();

        assert_eq!(cart.user_id, "user-1");
        assert!(cart.id.is_none());
        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn test_first_add_creates_the_cart() {
        let (carts, _products) = services();
        let cart = carts.add_item("user-1", "p-1", 2).await.unwrap();

        assert!(cart.id.is_some());
        assert_eq!(cart.items, vec![CartItem::new("p-1", 2)]);

        let again = carts.get("user-1").await.unwrap();
        assert_eq!(again.id, cart.id);
    }

    #[tokio::test]
    async fn test_adding_the_same_product_merges_quantities() {
        let (carts, _products) = services();
        carts.add_item("user-1", "p-1", 2).await.unwrap();
        let cart = carts.add_item("user-1", "p-1", 3).await.unwrap();

        assert_eq!(cart.items, vec![CartItem::new("p-1", 5)]);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[tokio::test]
    async fn test_different_products_get_their_own_lines() {
        let (carts, _products) = services();
        carts.add_item("user-1", "p-1", 1).await.unwrap();
        let cart = carts.add_item("user-1", "p-2", 4).await.unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[tokio::test]
    async fn test_carts_are_per_user() {
        let (carts, _products) = services();
        carts.add_item("user-1", "p-1", 1).await.unwrap();
        carts.add_item("user-2", "p-1", 9).await.unwrap();

        assert_eq!(carts.get("user-1").await.unwrap().total_quantity(), 1);
        assert_eq!(carts.get("user-2").await.unwrap().total_quantity(), 9);
    }

    #[tokio::test]
    async fn test_get_resolved_joins_the_catalog() {
        let (carts, products) = services();
        let laptop = products
            .create(ProductInput::new("Laptop", 75000.0))
            .await
            .unwrap();

        carts.add_item("user-1", &laptop.id, 2).await.unwrap();
        carts.add_item("user-1", "gone", 1).await.unwrap();

        let resolved = carts.get_resolved("user-1").await.unwrap();
        assert_eq!(resolved.items.len(), 2);
        assert_eq!(resolved.items[0].product.as_ref().unwrap().name, "Laptop");
        assert_eq!(resolved.items[0].quantity, 2);
        assert_eq!(resolved.items[1].product, None);
    }

    #[tokio::test]
    async fn test_clear() {
        let (carts, _products) = services();
        carts.add_item("user-1", "p-1", 1).await.unwrap();

        assert!(carts.clear("user-1").await.unwrap());
        assert!(carts.get("user-1").await.unwrap().items.is_empty());
        assert!(!carts.clear("user-1").await.unwrap());
    }
}
