//! Sensordeck API Server
//!
//! Run with: cargo run --bin sensordeck
//!
//! # Configuration
//!
//! Loaded from a TOML file (`--config`, or the default locations), then
//! overridden by environment variables:
//! - `SENSORDECK_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SENSORDECK_PORT`: Port to listen on (default: 3000)
//! - `SENSORDECK_DATA_DIR`: Data directory
//! - `SENSORDECK_PUBLIC_DIR`: Static dashboard directory (default: public)
//! - `RUST_LOG`: Log level (default: info)

use clap::Parser;
use sensordeck::api::{serve, ApiConfig, AppState};
use sensordeck::config::Config;
use sensordeck::query::QueryEngine;
use sensordeck::store::{JsonStore, ReadingStore, StoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "sensordeck", version, about = "Sensordeck measurement API server")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    tracing::info!("Starting Sensordeck API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.store.data_dir);

    let store = Arc::new(JsonStore::open(StoreConfig::new(&config.store.data_dir)).await?);
    tracing::info!("Reading store opened: {} readings", store.len().await);

    let engine = Arc::new(QueryEngine::new(
        Arc::clone(&store) as Arc<dyn ReadingStore>
    ));

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        public_dir: PathBuf::from(&config.api.public_dir),
    };

    let state = AppState::new(store, engine, api_config.clone());

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Sensordeck API server stopped");
    Ok(())
}

/// Initialize tracing from the logging config, honoring RUST_LOG
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "sensordeck={},tower_http=debug",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
