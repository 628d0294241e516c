//! Application wiring.
//!
//! Builds the concrete repository, cache, and service instances and hands
//! them out as trait objects.

use std::sync::Arc;
use tracing::info;
use vitrine_config::AppConfig;
use vitrine_core::{VitrineError, VitrineResult};
use vitrine_repository::{DatabasePool, MySqlProductRepository};
use vitrine_service::{CacheInterface, ProductService, ProductServiceImpl, RedisCacheService};

/// Fully wired application components.
pub struct AppContext {
    pub db_pool: Arc<DatabasePool>,
    pub product_service: Arc<dyn ProductService>,
}

impl AppContext {
    /// Wires the application from configuration and an established
    /// database pool.
    pub fn build(config: &AppConfig, db_pool: Arc<DatabasePool>) -> VitrineResult<Self> {
        let cache = build_cache(config)?;
        let repository = Arc::new(MySqlProductRepository::new(db_pool.clone()));
        let product_service: Arc<dyn ProductService> =
            Arc::new(ProductServiceImpl::new(repository, cache));

        Ok(Self {
            db_pool,
            product_service,
        })
    }
}

/// Builds the cache service, or a disabled stand-in when Redis is off.
fn build_cache(config: &AppConfig) -> VitrineResult<Arc<dyn CacheInterface>> {
    if !config.redis.enabled {
        info!("Redis disabled, running without a listing cache");
        return Ok(Arc::new(RedisCacheService::disabled()));
    }

    let redis_config = deadpool_redis::Config::from_url(&config.redis.url);
    let pool = redis_config
        .builder()
        .map_err(|e| VitrineError::Cache(format!("Invalid Redis configuration: {e}")))?
        .max_size(config.redis.pool_size as usize)
        .runtime(deadpool_redis::Runtime::Tokio1)
        .build()
        .map_err(|e| VitrineError::Cache(format!("Failed to build Redis pool: {e}")))?;

    info!("Redis connection pool configured for {}", config.redis.url);
    Ok(Arc::new(RedisCacheService::new(Arc::new(pool))))
}
