//! Product entity.

use crate::{Entity, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity, the sole record type of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Product {
    /// Unique identifier for the product.
    pub id: ProductId,

    /// Product title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Price, stored as text to match the catalog import format.
    #[validate(length(min = 1, max = 20))]
    pub price: String,

    /// Creation timestamp, set once and immutable thereafter.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product with the given title and price.
    #[must_use]
    pub fn new(title: String, price: String) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            title,
            price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Renames the product.
    pub fn rename(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Changes the product's price.
    pub fn reprice(&mut self, price: String) {
        self.price = price;
        self.updated_at = Utc::now();
    }

    /// Refreshes the update timestamp without changing any field.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity<ProductId> for Product {
    fn id(&self) -> &ProductId {
        &self.id
    }
}
