//! MySQL connection pooling.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::sync::Arc;
use tracing::info;
use vitrine_config::DatabaseConfig;
use vitrine_core::{VitrineError, VitrineResult};

/// Owns the MySQL pool and the operations that act on it as a whole.
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Opens a pool against the configured database.
    pub async fn connect(config: &DatabaseConfig) -> VitrineResult<Self> {
        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| VitrineError::Database(format!("failed to connect: {e}")))?;

        info!(
            "MySQL pool established ({}..{} connections)",
            config.min_connections, config.max_connections
        );
        Ok(Self { pool })
    }

    /// The raw pool, for query execution.
    #[must_use]
    pub fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trips a trivial query. Used by the readiness probe.
    pub async fn health_check(&self) -> VitrineResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| VitrineError::Database(format!("health check failed: {e}")))?;
        Ok(())
    }

    /// Applies pending migrations from the workspace `migrations/` dir.
    pub async fn run_migrations(&self) -> VitrineResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| VitrineError::Database(format!("migration failed: {e}")))?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Drains and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Connects and wraps the pool for shared ownership.
pub async fn create_pool(config: &DatabaseConfig) -> VitrineResult<Arc<DatabasePool>> {
    Ok(Arc::new(DatabasePool::connect(config).await?))
}
