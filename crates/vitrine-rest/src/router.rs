//! Router assembly.

use crate::{
    controllers::{cache_controller, health_controller, product_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use vitrine_config::ServerConfig;

/// Assembles the full application router.
///
/// Probes sit at the root, the API under `/api/v1`, Swagger UI at
/// `/swagger-ui`.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let api = Router::new()
        .nest("/products", product_controller::router())
        .nest("/cache", cache_controller::router());

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api)
        .route("/", get(root))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(CompressionLayer::new())
        .layer(cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router assembled, Swagger UI at /swagger-ui");
    router
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if !config.cors_enabled {
        return CorsLayer::new();
    }
    if config.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> &'static str {
    "Vitrine Catalog API v1"
}
