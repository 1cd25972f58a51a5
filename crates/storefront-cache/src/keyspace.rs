//! Cache key layout.

/// Cache key layout for one collection: an item key per document plus one
/// coarse collection-level key for the "list everything" read-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    item_prefix: String,
    collection_key: String,
}

impl Keyspace {
    /// Creates a keyspace with an explicit item prefix and collection key.
    #[must_use]
    pub fn new(item_prefix: impl Into<String>, collection_key: impl Into<String>) -> Self {
        Self {
            item_prefix: item_prefix.into(),
            collection_key: collection_key.into(),
        }
    }

    /// The product catalog keyspace (`product:{id}` / `products:all`).
    #[must_use]
    pub fn products() -> Self {
        Self::new("product", "products:all")
    }

    /// The cache key for one item.
    #[must_use]
    pub fn item_key(&self, id: &str) -> String {
        format!("{}:{}", self.item_prefix, id)
    }

    /// The coarse key caching the whole collection listing.
    #[must_use]
    pub fn collection_key(&self) -> &str {
        &self.collection_key
    }
}
