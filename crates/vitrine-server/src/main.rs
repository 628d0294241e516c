//! # Vitrine Server
//!
//! Main entry point for the vitrine product catalog service.

use tokio::signal;
use tracing::{error, info};
use vitrine_core::{VitrineError, VitrineResult};
use vitrine_repository::create_pool;
use vitrine_rest::{create_router, AppState};
use vitrine_server::di::AppContext;
use vitrine_server::{init_logging, startup};

#[tokio::main]
async fn main() {
    init_logging();

    startup::print_banner();
    info!("Starting Vitrine Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> VitrineResult<()> {
    // Load configuration
    let config = vitrine_config::load()?;

    info!("Environment: {}", config.app.environment);

    // Create database pool and run migrations
    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    // Wire the application
    let context = AppContext::build(&config, db_pool)?;

    // Create REST router
    let app_state = AppState::new(context.product_service.clone(), context.db_pool.clone());
    let router = create_router(app_state, &config.server);

    // Start REST server
    let addr = config.server.addr();
    info!("Starting REST server on http://{}", addr);
    startup::print_startup_info(config.server.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| VitrineError::Internal(format!("Failed to bind: {e}")))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| VitrineError::Internal(format!("Server error: {e}")))?;

    context.db_pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
