//! Product service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use crate::product_service::ProductService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use vitrine_core::{Product, ProductId, ValidateExt, VitrineError, VitrineResult};
use vitrine_repository::{ProductChanges, ProductRepository};

/// Product service backed by a repository and a shared cache.
///
/// All writes flow through this type. That makes it the single place
/// where the cached listing is dropped, which is what keeps the cache
/// coherent without TTLs.
pub struct ProductServiceImpl<R: ProductRepository> {
    product_repository: Arc<R>,
    cache: Arc<dyn CacheInterface>,
}

impl<R: ProductRepository> ProductServiceImpl<R> {
    /// Creates a new product service.
    pub fn new(product_repository: Arc<R>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            product_repository,
            cache,
        }
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> ProductService for ProductServiceImpl<R> {
    async fn create_product(&self, request: CreateProductRequest) -> VitrineResult<ProductResponse> {
        debug!("Creating product: {}", request.title);

        request.validate_request()?;

        let product = Product::new(request.title, request.price);
        let saved = self.product_repository.insert(&product).await?;

        self.cache.delete(cache_keys::product_listing()).await?;

        info!("Product created: {}", saved.id);
        Ok(ProductResponse::from(saved))
    }

    async fn get_product(&self, id: ProductId) -> VitrineResult<ProductResponse> {
        debug!("Getting product: {}", id);

        let product = self
            .product_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| VitrineError::not_found("Product", id))?;

        Ok(ProductResponse::from(product))
    }

    async fn get_listing(&self) -> VitrineResult<ProductListResponse> {
        debug!("Getting product listing");

        // An empty cached vec is a valid hit. Only a missing key falls
        // through to the database.
        if let Some(products) = self
            .cache
            .get::<Vec<ProductResponse>>(cache_keys::product_listing())
            .await?
        {
            debug!("Serving listing from cache ({} products)", products.len());
            return Ok(ProductListResponse::from(products));
        }

        let products: Vec<ProductResponse> = self
            .product_repository
            .find_all()
            .await?
            .iter()
            .map(ProductResponse::from)
            .collect();

        self.cache
            .set(cache_keys::product_listing(), &products)
            .await?;

        debug!("Listing loaded from database ({} products)", products.len());
        Ok(ProductListResponse::from(products))
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> VitrineResult<()> {
        debug!("Updating product: {}", id);

        request.validate_request()?;

        // Invalidate before persisting. If the write fails midway the
        // cache is already empty, never stale.
        self.cache.delete(cache_keys::product_listing()).await?;

        let changes = ProductChanges {
            title: request.title,
            price: request.price,
        };

        let rows = self.product_repository.update_fields(id, changes).await?;
        if rows == 0 {
            debug!("Update targeted unknown product: {}", id);
        } else {
            info!("Product updated: {}", id);
        }

        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> VitrineResult<()> {
        debug!("Deleting product: {}", id);

        let deleted = self.product_repository.delete(id).await?;
        self.cache.delete(cache_keys::product_listing()).await?;

        if deleted {
            info!("Product deleted: {}", id);
        } else {
            debug!("Delete targeted unknown product: {}", id);
        }

        Ok(())
    }

    async fn invalidate_listing(&self) -> VitrineResult<()> {
        let existed = self.cache.delete(cache_keys::product_listing()).await?;
        info!("Listing cache invalidated (entry existed: {})", existed);
        Ok(())
    }

    async fn count_products(&self) -> VitrineResult<u64> {
        self.product_repository.count().await
    }
}

impl<R: ProductRepository> std::fmt::Debug for ProductServiceImpl<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    type EventLog = Arc<Mutex<Vec<String>>>;

    /// In-memory repository that records calls for ordering assertions.
    struct InMemoryProductRepository {
        products: Mutex<HashMap<ProductId, Product>>,
        find_all_calls: AtomicUsize,
        events: EventLog,
    }

    impl InMemoryProductRepository {
        fn new(events: EventLog) -> Self {
            Self {
                products: Mutex::new(HashMap::new()),
                find_all_calls: AtomicUsize::new(0),
                events,
            }
        }

        fn find_all_count(&self) -> usize {
            self.find_all_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn insert(&self, product: &Product) -> VitrineResult<Product> {
            self.events.lock().unwrap().push("repo.insert".to_string());
            let mut products = self.products.lock().unwrap();
            products.insert(product.id, product.clone());
            Ok(product.clone())
        }

        async fn find_by_id(&self, id: ProductId) -> VitrineResult<Option<Product>> {
            let products = self.products.lock().unwrap();
            Ok(products.get(&id).cloned())
        }

        async fn find_all(&self) -> VitrineResult<Vec<Product>> {
            self.find_all_calls.fetch_add(1, Ordering::SeqCst);
            let products = self.products.lock().unwrap();
            let mut all: Vec<Product> = products.values().cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(all)
        }

        async fn update_fields(
            &self,
            id: ProductId,
            changes: ProductChanges,
        ) -> VitrineResult<u64> {
            self.events
                .lock()
                .unwrap()
                .push("repo.update_fields".to_string());
            let mut products = self.products.lock().unwrap();
            match products.get_mut(&id) {
                Some(product) => {
                    if let Some(title) = changes.title {
                        product.title = title;
                    }
                    if let Some(price) = changes.price {
                        product.price = price;
                    }
                    product.updated_at = Utc::now();
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn delete(&self, id: ProductId) -> VitrineResult<bool> {
            self.events.lock().unwrap().push("repo.delete".to_string());
            let mut products = self.products.lock().unwrap();
            Ok(products.remove(&id).is_some())
        }

        async fn count(&self) -> VitrineResult<u64> {
            let products = self.products.lock().unwrap();
            Ok(products.len() as u64)
        }
    }

    /// In-memory cache that records deletions for ordering assertions.
    struct InMemoryCache {
        entries: Mutex<HashMap<String, String>>,
        events: EventLog,
    }

    impl InMemoryCache {
        fn new(events: EventLog) -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                events,
            }
        }

        fn contains(&self, key: &str) -> bool {
            self.entries.lock().unwrap().contains_key(key)
        }
    }

    #[async_trait]
    impl CacheInterface for InMemoryCache {
        fn is_enabled(&self) -> bool {
            true
        }

        async fn get_raw(&self, key: &str) -> VitrineResult<Option<String>> {
            let entries = self.entries.lock().unwrap();
            Ok(entries.get(key).cloned())
        }

        async fn set_raw(&self, key: &str, value: &str) -> VitrineResult<()> {
            let mut entries = self.entries.lock().unwrap();
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> VitrineResult<bool> {
            self.events.lock().unwrap().push("cache.delete".to_string());
            let mut entries = self.entries.lock().unwrap();
            Ok(entries.remove(key).is_some())
        }

        async fn exists(&self, key: &str) -> VitrineResult<bool> {
            let entries = self.entries.lock().unwrap();
            Ok(entries.contains_key(key))
        }
    }

    /// Cache whose operations all fail, for error propagation tests.
    struct FailingCache;

    #[async_trait]
    impl CacheInterface for FailingCache {
        fn is_enabled(&self) -> bool {
            true
        }

        async fn get_raw(&self, _key: &str) -> VitrineResult<Option<String>> {
            Err(VitrineError::Cache("connection refused".to_string()))
        }

        async fn set_raw(&self, _key: &str, _value: &str) -> VitrineResult<()> {
            Err(VitrineError::Cache("connection refused".to_string()))
        }

        async fn delete(&self, _key: &str) -> VitrineResult<bool> {
            Err(VitrineError::Cache("connection refused".to_string()))
        }

        async fn exists(&self, _key: &str) -> VitrineResult<bool> {
            Err(VitrineError::Cache("connection refused".to_string()))
        }
    }

    struct Fixture {
        service: ProductServiceImpl<InMemoryProductRepository>,
        repo: Arc<InMemoryProductRepository>,
        cache: Arc<InMemoryCache>,
        events: EventLog,
    }

    fn fixture() -> Fixture {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let repo = Arc::new(InMemoryProductRepository::new(events.clone()));
        let cache = Arc::new(InMemoryCache::new(events.clone()));
        let service = ProductServiceImpl::new(repo.clone(), cache.clone() as Arc<dyn CacheInterface>);
        Fixture {
            service,
            repo,
            cache,
            events,
        }
    }

    fn create_request(title: &str, price: &str) -> CreateProductRequest {
        CreateProductRequest {
            title: title.to_string(),
            price: price.to_string(),
        }
    }

    const LISTING_KEY: &str = "product_objects";

    #[tokio::test]
    async fn test_create_invalidates_cached_listing() {
        let f = fixture();

        f.service.get_listing().await.unwrap();
        assert!(f.cache.contains(LISTING_KEY));

        f.service
            .create_product(create_request("Widget", "9.99"))
            .await
            .unwrap();

        assert!(!f.cache.contains(LISTING_KEY));
    }

    #[tokio::test]
    async fn test_update_is_visible_in_next_listing() {
        let f = fixture();

        let created = f
            .service
            .create_product(create_request("Widget", "9.99"))
            .await
            .unwrap();

        let listing = f.service.get_listing().await.unwrap();
        assert_eq!(listing.products[0].title, "Widget");

        f.service
            .update_product(
                created.id,
                UpdateProductRequest {
                    title: Some("Gadget".to_string()),
                    price: None,
                },
            )
            .await
            .unwrap();

        let listing = f.service.get_listing().await.unwrap();
        assert_eq!(listing.products[0].title, "Gadget");
        assert_eq!(listing.products[0].price, "9.99");
    }

    #[tokio::test]
    async fn test_delete_is_visible_in_next_listing() {
        let f = fixture();

        let created = f
            .service
            .create_product(create_request("Widget", "9.99"))
            .await
            .unwrap();
        f.service.get_listing().await.unwrap();

        f.service.delete_product(created.id).await.unwrap();

        let listing = f.service.get_listing().await.unwrap();
        assert!(listing.products.is_empty());
        assert_eq!(listing.total, 0);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_the_database() {
        let f = fixture();
        f.service
            .create_product(create_request("Widget", "9.99"))
            .await
            .unwrap();

        f.service.get_listing().await.unwrap();
        f.service.get_listing().await.unwrap();
        f.service.get_listing().await.unwrap();

        assert_eq!(f.repo.find_all_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_listing_is_a_cacheable_value() {
        let f = fixture();

        let listing = f.service.get_listing().await.unwrap();
        assert_eq!(listing.total, 0);

        // A second read must hit the cached empty vec, not the database.
        let listing = f.service.get_listing().await.unwrap();
        assert_eq!(listing.total, 0);
        assert_eq!(f.repo.find_all_count(), 1);
    }

    #[tokio::test]
    async fn test_listing_orders_newest_first() {
        let f = fixture();

        let mut oldest = Product::new("oldest".to_string(), "1".to_string());
        oldest.created_at = Utc::now() - chrono::Duration::seconds(30);
        let mut middle = Product::new("middle".to_string(), "2".to_string());
        middle.created_at = Utc::now() - chrono::Duration::seconds(20);
        let mut newest = Product::new("newest".to_string(), "3".to_string());
        newest.created_at = Utc::now() - chrono::Duration::seconds(10);

        f.repo.insert(&middle).await.unwrap();
        f.repo.insert(&oldest).await.unwrap();
        f.repo.insert(&newest).await.unwrap();

        let listing = f.service.get_listing().await.unwrap();
        let titles: Vec<&str> = listing.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_update_invalidates_before_persisting() {
        let f = fixture();
        let created = f
            .service
            .create_product(create_request("Widget", "9.99"))
            .await
            .unwrap();

        f.events.lock().unwrap().clear();

        f.service
            .update_product(
                created.id,
                UpdateProductRequest {
                    title: Some("Gadget".to_string()),
                    price: None,
                },
            )
            .await
            .unwrap();

        let events = f.events.lock().unwrap().clone();
        assert_eq!(events, vec!["cache.delete", "repo.update_fields"]);
    }

    #[tokio::test]
    async fn test_empty_update_touches_updated_at() {
        let f = fixture();
        let created = f
            .service
            .create_product(create_request("Widget", "9.99"))
            .await
            .unwrap();
        let before = created.updated_at;

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        f.service
            .update_product(created.id, UpdateProductRequest::default())
            .await
            .unwrap();

        let after = f.service.get_product(created.id).await.unwrap();
        assert_eq!(after.title, "Widget");
        assert_eq!(after.price, "9.99");
        assert!(after.updated_at > before);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_silent_but_still_invalidates() {
        let f = fixture();
        f.service.get_listing().await.unwrap();
        assert!(f.cache.contains(LISTING_KEY));

        f.service
            .update_product(
                ProductId::new(),
                UpdateProductRequest {
                    title: Some("Ghost".to_string()),
                    price: None,
                },
            )
            .await
            .unwrap();

        assert!(!f.cache.contains(LISTING_KEY));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_silent_but_still_invalidates() {
        let f = fixture();
        f.service.get_listing().await.unwrap();
        assert!(f.cache.contains(LISTING_KEY));

        f.service.delete_product(ProductId::new()).await.unwrap();

        assert!(!f.cache.contains(LISTING_KEY));
    }

    #[tokio::test]
    async fn test_get_product_unknown_id_is_not_found() {
        let f = fixture();
        let err = f.service.get_product(ProductId::new()).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let f = fixture();
        let err = f
            .service
            .create_product(create_request("   ", "9.99"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(f.repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_rejects_oversized_title() {
        let f = fixture();
        let err = f
            .service
            .update_product(
                ProductId::new(),
                UpdateProductRequest {
                    title: Some("x".repeat(201)),
                    price: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalidate_listing_drops_the_entry() {
        let f = fixture();
        f.service.get_listing().await.unwrap();
        assert!(f.cache.contains(LISTING_KEY));

        f.service.invalidate_listing().await.unwrap();
        assert!(!f.cache.contains(LISTING_KEY));
    }

    #[tokio::test]
    async fn test_cache_failure_propagates_from_listing() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let repo = Arc::new(InMemoryProductRepository::new(events));
        let service = ProductServiceImpl::new(repo, Arc::new(FailingCache) as Arc<dyn CacheInterface>);

        let err = service.get_listing().await.unwrap_err();
        assert_eq!(err.error_code(), "CACHE_ERROR");
    }

    #[tokio::test]
    async fn test_cache_failure_propagates_from_create() {
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let repo = Arc::new(InMemoryProductRepository::new(events));
        let service = ProductServiceImpl::new(repo, Arc::new(FailingCache) as Arc<dyn CacheInterface>);

        let err = service
            .create_product(create_request("Widget", "9.99"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "CACHE_ERROR");
    }

    #[tokio::test]
    async fn test_count_products() {
        let f = fixture();
        f.service
            .create_product(create_request("a", "1"))
            .await
            .unwrap();
        f.service
            .create_product(create_request("b", "2"))
            .await
            .unwrap();

        assert_eq!(f.service.count_products().await.unwrap(), 2);
    }
}
