//! HTTP layer exposing the core as a small JSON API.
//!
//! ## Endpoints
//!
//! - `GET /health` - liveness probe
//! - `GET /countries` - non-aggregate economies with region names
//! - `GET /data` - combined GDP + fertility dataset
//! - `GET /data/gdp`, `GET /data/fertility` - a single indicator series
//!
//! Every error body is `{success:false, error, message}`. CORS is open to any origin.

pub mod error;
pub mod handlers;

use crate::api::DataProvider;
use crate::config::{Indicators, ServerConfig};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider + Send + Sync>,
    pub indicators: Arc<Indicators>,
}

impl AppState {
    pub fn new(provider: Arc<dyn DataProvider + Send + Sync>, indicators: Indicators) -> Self {
        Self {
            provider,
            indicators: Arc::new(indicators),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/countries", get(handlers::countries))
        .route("/data", get(handlers::data))
        .route("/data/gdp", get(handlers::gdp_data))
        .route("/data/fertility", get(handlers::fertility_data))
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(state)
}

/// Bind `config` and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!("Starting GDP Fertility Viz API server on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve http")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
