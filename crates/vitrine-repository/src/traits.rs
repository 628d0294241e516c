//! Repository traits.

use async_trait::async_trait;
use vitrine_core::{Product, ProductId, VitrineResult};

/// Field changes applied by a partial product update.
///
/// A `None` field is left untouched. The update timestamp is refreshed
/// even when every field is `None`.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    /// New title, if any.
    pub title: Option<String>,
    /// New price, if any.
    pub price: Option<String>,
}

impl ProductChanges {
    /// Returns true when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.price.is_none()
    }
}

/// Repository for product persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new product.
    async fn insert(&self, product: &Product) -> VitrineResult<Product>;

    /// Finds a product by its identifier.
    async fn find_by_id(&self, id: ProductId) -> VitrineResult<Option<Product>>;

    /// Returns every product, newest first.
    async fn find_all(&self) -> VitrineResult<Vec<Product>>;

    /// Applies a partial update and returns the number of matched rows.
    ///
    /// Zero means no product carries the given identifier.
    async fn update_fields(&self, id: ProductId, changes: ProductChanges) -> VitrineResult<u64>;

    /// Deletes a product. Returns false when the identifier is unknown.
    async fn delete(&self, id: ProductId) -> VitrineResult<bool>;

    /// Counts all products.
    async fn count(&self) -> VitrineResult<u64>;
}
