//! Cache administration controller.

use crate::{
    responses::{no_content, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::post, Router};
use tracing::debug;

/// Creates the cache router.
pub fn router() -> Router<AppState> {
    Router::new().route("/invalidate", post(invalidate_listing))
}

/// Drop the cached product listing.
#[utoipa::path(
    post,
    path = "/cache/invalidate",
    tag = "cache",
    responses(
        (status = 204, description = "Cached listing dropped")
    )
)]
pub async fn invalidate_listing(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    debug!("Cache invalidation request");

    state.product_service.invalidate_listing().await?;
    Ok(no_content())
}
