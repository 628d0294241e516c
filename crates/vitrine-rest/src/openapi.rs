//! OpenAPI documentation configuration.
//!
//! This module provides OpenAPI/Swagger documentation generation for the REST API.

use utoipa::OpenApi;
use vitrine_core::{ErrorResponse, FieldError, ProductId};
use vitrine_service::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};

/// OpenAPI documentation for the Vitrine catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vitrine Catalog API",
        version = "1.0.0",
        description = "RESTful API for the Vitrine product catalog",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Product endpoints
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        // Cache endpoints
        crate::controllers::cache_controller::invalidate_listing,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            ProductId,
            ErrorResponse,
            FieldError,
            // Product DTOs
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            ProductListResponse,
        )
    ),
    tags(
        (name = "products", description = "Product catalog endpoints"),
        (name = "cache", description = "Cache administration endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
