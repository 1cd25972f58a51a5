//! Sample catalog fixtures for local development and tests.

use storefront_core::{Product, ProductInput};

use crate::error::ServiceError;
use crate::products::ProductService;

/// The sample catalog inserted by [`seed_products`].
#[must_use]
pub fn sample_products() -> Vec<ProductInput> {
    vec![
        ProductInput::new("Laptop", 75000.0)
            .with_description("A powerful laptop")
            .with_stock(10)
            .with_category("Electronics"),
        ProductInput::new("Headphones", 3500.0)
            .with_description("Noise-cancelling headphones")
            .with_stock(50)
            .with_category("Electronics"),
        ProductInput::new("Coffee Mug", 250.0)
            .with_description("Ceramic coffee mug")
            .with_stock(100)
            .with_category("Kitchen"),
    ]
}

/// Inserts the sample catalog through the product service, so each create
/// invalidates the collection cache like any other write.
///
/// # Errors
///
/// Fails when any insert fails; fixtures inserted before the failure stay.
pub async fn seed_products(products: &ProductService) -> Result<Vec<Product>, ServiceError> {
    let fixtures = sample_products();
    let mut created = Vec::with_capacity(fixtures.len());
    for input in fixtures {
        created.push(products.create(input).await?);
    }
    tracing::info!(count = created.len(), "sample catalog seeded");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront_cache::InMemoryCache;
    use storefront_db_memory::InMemoryStore;
    use storefront_loader::LoaderConfig;

    use super::*;

    #[tokio::test]
    async fn test_seed_populates_the_catalog() {
        let service = ProductService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryCache::new()),
            &LoaderConfig::default(),
        );

        let created = seed_products(&service).await.unwrap();
        assert_eq!(created.len(), 3);

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().any(|product| product.name == "Coffee Mug"));
    }
}
