//! Order service.
//!
//! Placing an order writes the order document first and clears the user's
//! cart afterwards. Orders are never cached; product data inside a resolved
//! order goes through the product loader.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use storefront_core::{Order, OrderItem, OrderStatus};
use storefront_storage::DynStore;
use tracing::{info, instrument};

use crate::carts::{CartService, ResolvedItem};
use crate::error::ServiceError;
use crate::products::ProductService;

/// Collection name for orders.
pub const ORDERS: &str = "orders";

/// An order with every line resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOrder {
    pub order: Order,
    pub items: Vec<ResolvedItem>,
}

/// Order service.
pub struct OrderService {
    store: DynStore,
    products: Arc<ProductService>,
    carts: Arc<CartService>,
}

impl OrderService {
    #[must_use]
    pub fn new(store: DynStore, products: Arc<ProductService>, carts: Arc<CartService>) -> Self {
        Self {
            store,
            products,
            carts,
        }
    }

    /// Places an order with explicit line items, then clears the user's cart.
    ///
    /// The order starts in [`OrderStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidOrder` for an empty item list; store failures
    /// propagate.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn place(
        &self,
        user_id: &str,
        items: Vec<OrderItem>,
        total_price: f64,
    ) -> Result<Order, ServiceError> {
        if items.is_empty() {
            return Err(ServiceError::invalid_order("order has no items"));
        }

        let document = json!({
            "userId": user_id,
            "items": items,
            "totalPrice": total_price,
            "status": OrderStatus::Pending,
        });
        let stored = self.store.insert(ORDERS, &document).await?;
        // order is committed; the cart is consumed by the checkout
        self.carts.clear(user_id).await?;
        info!(id = %stored.id, total_price, "order placed");
        Ok(serde_json::from_value(stored.document)?)
    }

    /// Places an order from the user's current cart, pricing each line from
    /// the catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOrder` when the cart is empty or references a product
    /// that no longer exists.
    pub async fn place_from_cart(&self, user_id: &str) -> Result<Order, ServiceError> {
        let cart = self.carts.get(user_id).await?;
        if cart.items.is_empty() {
            return Err(ServiceError::invalid_order("cart is empty"));
        }

        let ids: Vec<String> = cart
            .items
            .iter()
            .map(|item| item.product_id.clone())
            .collect();
        let products = self.products.get_many(&ids).await?;

        let mut items = Vec::with_capacity(cart.items.len());
        let mut total_price = 0.0;
        for (line, product) in cart.items.iter().zip(products) {
            let Some(product) = product else {
                return Err(ServiceError::invalid_order(format!(
                    "unknown product {}",
                    line.product_id
                )));
            };
            total_price += product.price * line.quantity as f64;
            items.push(OrderItem::new(&line.product_id, line.quantity));
        }

        self.place(user_id, items, total_price).await
    }

    /// Reads one order by ID.
    ///
    /// # Errors
    ///
    /// Fails when the store lookup fails or the stored order is malformed.
    pub async fn get(&self, id: &str) -> Result<Option<Order>, ServiceError> {
        let document = self.store.find_by_id(ORDERS, id).await?;
        Ok(document
            .map(|doc| serde_json::from_value(doc.document))
            .transpose()?)
    }

    /// Lists a user's orders.
    ///
    /// # Errors
    ///
    /// Fails when the store lookup fails or a stored order is malformed.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, ServiceError> {
        let documents = self
            .store
            .find_by_field(ORDERS, "userId", &Value::String(user_id.to_string()))
            .await?;
        documents
            .into_iter()
            .map(|doc| serde_json::from_value(doc.document).map_err(ServiceError::from))
            .collect()
    }

    /// Reads one order with every line resolved against the catalog.
    ///
    /// # Errors
    ///
    /// Fails when the store lookup or the batched product fetch fails.
    pub async fn get_resolved(&self, id: &str) -> Result<Option<ResolvedOrder>, ServiceError> {
        let Some(order) = self.get(id).await? else {
            return Ok(None);
        };

        let ids: Vec<String> = order
            .items
            .iter()
            .map(|item| item.product_id.clone())
            .collect();
        let products = self.products.get_many(&ids).await?;
        let items = order
            .items
            .iter()
            .zip(products)
            .map(|(item, product)| ResolvedItem {
                product,
                quantity: item.quantity,
            })
            .collect();
        Ok(Some(ResolvedOrder { order, items }))
    }
}

#[cfg(test)]
mod tests {
    use storefront_cache::InMemoryCache;
    use storefront_core::ProductInput;
    use storefront_db_memory::InMemoryStore;
    use storefront_loader::LoaderConfig;

    use super::*;

    struct Stack {
        products: Arc<ProductService>,
        carts: Arc<CartService>,
        orders: OrderService,
    }

    fn stack() -> Stack {
        let store: DynStore = Arc::new(InMemoryStore::new());
        let products = Arc::new(ProductService::new(
            Arc::clone(&store),
            Arc::new(InMemoryCache::new()),
            &LoaderConfig::default(),
        ));
        let carts = Arc::new(CartService::new(Arc::clone(&store), Arc::clone(&products)));
        let orders = OrderService::new(store, Arc::clone(&products), Arc::clone(&carts));
        Stack {
            products,
            carts,
            orders,
        }
    }

    #[tokio::test]
    async fn test_place_with_explicit_items() {
        let stack = stack();

        let order = stack
            .orders
            .place("user-1", vec![OrderItem::new("p-1", 2)], 500.0)
            .await
            .unwrap();

        assert_eq!(order.user_id, "user-1");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_price, 500.0);
        assert!(order.created_at.is_some());

        let found = stack.orders.get(&order.id).await.unwrap().unwrap();
        assert_eq!(found, order);
    }

    #[tokio::test]
    async fn test_place_rejects_empty_items() {
        let stack = stack();
        let err = stack.orders.place("user-1", vec![], 0.0).await.unwrap_err();
        assert!(err.is_invalid_order());
    }

    #[tokio::test]
    async fn test_place_from_cart_prices_and_clears() {
        let stack = stack();
        let laptop = stack
            .products
            .create(ProductInput::new("Laptop", 75000.0))
            .await
            .unwrap();
        let mug = stack
            .products
            .create(ProductInput::new("Mug", 250.0))
            .await
            .unwrap();

        stack.carts.add_item("user-1", &laptop.id, 1).await.unwrap();
        stack.carts.add_item("user-1", &mug.id, 2).await.unwrap();

        let order = stack.orders.place_from_cart("user-1").await.unwrap();

        assert_eq!(order.total_price, 75500.0);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.status, OrderStatus::Pending);

        // checkout consumed the cart
        let cart = stack.carts.get("user-1").await.unwrap();
        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn test_place_from_empty_cart_fails() {
        let stack = stack();
        let err = stack.orders.place_from_cart("user-1").await.unwrap_err();
        assert!(err.is_invalid_order());
    }

    #[tokio::test]
    async fn test_place_from_cart_with_unknown_product_fails() {
        let stack = stack();
        stack.carts.add_item("user-1", "gone", 1).await.unwrap();

        let err = stack.orders.place_from_cart("user-1").await.unwrap_err();
        assert!(err.is_invalid_order());

        // the cart survives a failed checkout
        assert_eq!(stack.carts.get("user-1").await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let stack = stack();
        stack
            .orders
            .place("user-1", vec![OrderItem::new("p-1", 1)], 10.0)
            .await
            .unwrap();
        stack
            .orders
            .place("user-1", vec![OrderItem::new("p-2", 1)], 20.0)
            .await
            .unwrap();
        stack
            .orders
            .place("user-2", vec![OrderItem::new("p-3", 1)], 30.0)
            .await
            .unwrap();

        let orders = stack.orders.list_for_user("user-1").await.unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|order| order.user_id == "user-1"));
    }

    #[tokio::test]
    async fn test_get_resolved() {
        let stack = stack();
        let mug = stack
            .products
            .create(ProductInput::new("Mug", 250.0))
            .await
            .unwrap();
        stack.carts.add_item("user-1", &mug.id, 3).await.unwrap();
        let order = stack.orders.place_from_cart("user-1").await.unwrap();

        let resolved = stack.orders.get_resolved(&order.id).await.unwrap().unwrap();
        assert_eq!(resolved.order.id, order.id);
        assert_eq!(resolved.items.len(), 1);
        assert_eq!(resolved.items[0].product.as_ref().unwrap().name, "Mug");
        assert_eq!(resolved.items[0].quantity, 3);

        assert!(stack.orders.get_resolved("ghost").await.unwrap().is_none());
    }
}
