//! Application state for Axum handlers.

use std::sync::Arc;
use vitrine_repository::DatabasePool;
use vitrine_service::ProductService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    /// Held for the readiness probe.
    pub db_pool: Arc<DatabasePool>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(product_service: Arc<dyn ProductService>, db_pool: Arc<DatabasePool>) -> Self {
        Self {
            product_service,
            db_pool,
        }
    }
}
