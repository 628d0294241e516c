//! MySQL product repository implementation.

use crate::{DatabasePool, ProductChanges, ProductRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use vitrine_core::{Product, ProductId, VitrineError, VitrineResult};

/// MySQL product repository implementation.
#[derive(Clone)]
pub struct MySqlProductRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlProductRepository {
    /// Creates a new MySQL product repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String, // MySQL stores UUID as CHAR(36)
    title: String,
    price: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = VitrineError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| VitrineError::Internal(format!("Invalid UUID in database: {e}")))?;

        Ok(Product {
            id: ProductId::from_uuid(id),
            title: row.title,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn insert(&self, product: &Product) -> VitrineResult<Product> {
        debug!("Inserting product: {}", product.title);

        let id_str = product.id.into_inner().to_string();

        // MySQL doesn't support RETURNING, so insert then select
        sqlx::query(
            r#"
            INSERT INTO products (id, title, price, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&product.title)
        .bind(&product.price)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(product.id)
            .await?
            .ok_or_else(|| VitrineError::Internal("Failed to fetch inserted product".to_string()))
    }

    async fn find_by_id(&self, id: ProductId) -> VitrineResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, price, created_at, updated_at
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn find_all(&self) -> VitrineResult<Vec<Product>> {
        debug!("Finding all products");

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, title, price, created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()
    }

    async fn update_fields(&self, id: ProductId, changes: ProductChanges) -> VitrineResult<u64> {
        debug!("Updating product: {}", id);

        // COALESCE keeps the stored value for unset fields. The update
        // timestamp is refreshed even for an empty change set.
        let result = sqlx::query(
            r#"
            UPDATE products
            SET title = COALESCE(?, title),
                price = COALESCE(?, price),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.title)
        .bind(changes.price)
        .bind(Utc::now())
        .bind(id.into_inner().to_string())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: ProductId) -> VitrineResult<bool> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.into_inner().to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> VitrineResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }
}

impl std::fmt::Debug for MySqlProductRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlProductRepository").finish_non_exhaustive()
    }
}
