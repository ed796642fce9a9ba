//! geodb-server — HTTP front end for geodb-core
//!
//! Usage examples
//! --------------
//!
//! - Serve the default dataset on port 3001
//!   $ geodb-server
//!
//! - Serve a gzipped dataset on another port, building it on first request
//!   $ geodb-server --data data/countries+states+cities.json.gz --port 8080 --lazy
use anyhow::Result;
use clap::Parser;
use geodb_core::DatasetCache;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geodb_server::{config::ServerConfig, web::WebServer};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting geodb-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Using dataset: {}", config.data.display());

    let cache = DatasetCache::from_path(&config.data);

    // Warm the dataset without holding up the listener; requests that
    // arrive meanwhile join the same build.
    if !config.lazy {
        let warm = cache.clone();
        tokio::spawn(async move {
            if let Err(e) = warm.ensure_ready().await {
                error!("Failed to initialize cache: {}", e);
            }
        });
    }

    WebServer::new(&config, cache)?.serve().await
}
