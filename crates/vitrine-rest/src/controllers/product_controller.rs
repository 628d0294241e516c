//! Product catalog controller.

use crate::{
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::debug;
use vitrine_core::{ProductId, VitrineError};
use vitrine_service::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// List all products, newest first.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "Full product listing", body = ProductListResponse)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<ProductListResponse> {
    debug!("List products request");

    let response = state.product_service.get_listing().await?;
    ok(response)
}

/// Create a new product.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid request body")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<crate::responses::ApiResponse<ProductResponse>>), AppError> {
    debug!("Create product request: {}", request.title);

    let response = state.product_service.create_product(request).await?;
    Ok(created(response))
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product identifier")
    ),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ProductResponse> {
    debug!("Get product request: {}", id);

    let product_id = parse_product_id(&id)?;
    let response = state.product_service.get_product(product_id).await?;
    ok(response)
}

/// Update a product. Unknown identifiers succeed without effect.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product identifier")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 204, description = "Update applied or target absent"),
        (status = 400, description = "Invalid request body")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<StatusCode, AppError> {
    debug!("Update product request: {}", id);

    let product_id = parse_product_id(&id)?;
    state
        .product_service
        .update_product(product_id, request)
        .await?;

    Ok(no_content())
}

/// Delete a product. Unknown identifiers succeed without effect.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product identifier")
    ),
    responses(
        (status = 204, description = "Delete applied or target absent")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);

    let product_id = parse_product_id(&id)?;
    state.product_service.delete_product(product_id).await?;

    Ok(no_content())
}

/// Parses a product ID from a path parameter.
fn parse_product_id(id: &str) -> Result<ProductId, AppError> {
    id.parse()
        .map_err(|_| AppError(VitrineError::validation(format!("Invalid product ID: {id}"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id_valid() {
        let id = ProductId::new();
        let parsed = parse_product_id(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_product_id_invalid() {
        let err = parse_product_id("not-a-uuid").unwrap_err();
        assert_eq!(err.0.error_code(), "VALIDATION_ERROR");
    }
}
