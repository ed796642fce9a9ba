//! Web layer module
//!
//! JSON-over-HTTP surface of the dataset. Handlers stay thin: they validate
//! the path, wait for the dataset, and hand off to the query layer in
//! `geodb-core`.

use anyhow::Result;
use axum::{routing::get, Router};
use geodb_core::DatasetCache;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use sysinfo::System;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::ServerConfig;

pub mod demo;
pub mod extractors;
pub mod handlers;
pub mod health;
pub mod responses;

pub use responses::ApiError;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub cache: DatasetCache,
    pub started: Instant,
    pub demo_data: PathBuf,
    pub system: Arc<Mutex<System>>,
}

impl AppState {
    pub fn new(cache: DatasetCache, demo_data: impl Into<PathBuf>) -> Self {
        AppState {
            cache,
            started: Instant::now(),
            demo_data: demo_data.into(),
            system: Arc::new(Mutex::new(System::new())),
        }
    }
}

/// All routes, with middleware and state applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(health::health_check))
        .route("/files", get(demo::files))
        // Countries
        .route("/countries", get(handlers::list_countries))
        .route("/countries/{id}", get(handlers::get_country))
        .route("/countries/iso/{code}", get(handlers::get_country_by_iso))
        .route("/countries/search/{term}", get(handlers::search_countries))
        .route("/countries/{id}/states", get(handlers::list_country_states))
        .route("/countries/{id}/cities", get(handlers::list_country_cities))
        // States
        .route("/states/{id}", get(handlers::get_state))
        .route("/states/{id}/cities", get(handlers::list_state_cities))
        // Regions
        .route("/regions", get(handlers::list_regions))
        .route("/regions/{region}/countries", get(handlers::region_countries))
        .route("/subregions", get(handlers::list_subregions))
        .route("/subregions/{subregion}/countries", get(handlers::subregion_countries))
        .fallback(handlers::not_found)
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &ServerConfig, cache: DatasetCache) -> Result<Self> {
        let state = AppState::new(cache, &config.demo_data);
        Ok(Self {
            app: router(state),
            addr: config.addr()?,
        })
    }

    /// Serve until SIGINT / SIGTERM.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Server ready on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
