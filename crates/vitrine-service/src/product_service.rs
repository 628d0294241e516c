//! Product service trait.

use crate::dto::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use async_trait::async_trait;
use vitrine_core::{ProductId, VitrineResult};

/// Product catalog operations.
///
/// Every mutation drops the cached listing, so readers never observe a
/// stale catalog through [`get_listing`](Self::get_listing).
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Creates a new product and invalidates the cached listing.
    async fn create_product(&self, request: CreateProductRequest) -> VitrineResult<ProductResponse>;

    /// Fetches a single product. Fails with a not-found error when absent.
    async fn get_product(&self, id: ProductId) -> VitrineResult<ProductResponse>;

    /// Returns the full listing, newest first, served from the cache
    /// when present.
    async fn get_listing(&self) -> VitrineResult<ProductListResponse>;

    /// Applies a partial update. Unknown identifiers are a silent no-op.
    ///
    /// The cached listing is dropped before the write is attempted, so
    /// even a failed persist cannot leave stale data behind.
    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> VitrineResult<()>;

    /// Deletes a product. Unknown identifiers are a silent no-op.
    async fn delete_product(&self, id: ProductId) -> VitrineResult<()>;

    /// Drops the cached listing unconditionally.
    async fn invalidate_listing(&self) -> VitrineResult<()>;

    /// Counts all products, bypassing the cache.
    async fn count_products(&self) -> VitrineResult<u64>;
}
