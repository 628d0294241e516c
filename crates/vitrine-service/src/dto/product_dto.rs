//! Product-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use vitrine_core::{rules::not_blank, Product, ProductId};

/// Request to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(
        custom(function = not_blank),
        length(max = 200, message = "Title cannot exceed 200 characters")
    )]
    pub title: String,

    #[validate(
        custom(function = not_blank),
        length(max = 20, message = "Price cannot exceed 20 characters")
    )]
    pub price: String,
}

/// Request to update a product. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 20, message = "Price must be 1-20 characters"))]
    pub price: Option<String>,
}

/// Product response DTO.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Full product listing response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub total: u64,
}

impl From<Vec<ProductResponse>> for ProductListResponse {
    fn from(products: Vec<ProductResponse>) -> Self {
        let total = products.len() as u64;
        Self { products, total }
    }
}
