//! Seeds the catalog from a JSON fixture file.

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use vitrine_core::{VitrineError, VitrineResult};
use vitrine_repository::create_pool;
use vitrine_server::di::AppContext;
use vitrine_server::init_logging;
use vitrine_service::CreateProductRequest;

/// Loads product fixtures into the catalog.
#[derive(Debug, Parser)]
#[command(name = "seed", about = "Seed the vitrine catalog from a JSON fixture")]
struct Args {
    /// Path to the fixture file.
    #[arg(long, default_value = "fixtures/products.json")]
    file: PathBuf,

    /// Maximum number of records to load.
    #[arg(long)]
    limit: Option<usize>,
}

/// Fixture record shape.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    title: String,
    price: String,
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run(Args::parse()).await {
        error!("Seed error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> VitrineResult<()> {
    let config = vitrine_config::load()?;

    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    let context = AppContext::build(&config, db_pool)?;
    let service = context.product_service;

    info!("Loading fixtures from {}", args.file.display());
    let raw = std::fs::read_to_string(&args.file).map_err(|e| {
        VitrineError::Configuration(format!("Failed to read {}: {e}", args.file.display()))
    })?;

    let mut records: Vec<SeedProduct> = serde_json::from_str(&raw)?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    let mut loaded = 0_usize;
    for record in records {
        let request = CreateProductRequest {
            title: record.title,
            price: record.price,
        };
        match service.create_product(request).await {
            Ok(product) => {
                loaded += 1;
                info!("Seeded product: {}", product.title);
            }
            Err(e) => warn!("Skipping invalid record: {}", e),
        }
    }

    let total = service.count_products().await?;
    info!("Seeded {} products ({} total in catalog)", loaded, total);

    context.db_pool.close().await;
    Ok(())
}
