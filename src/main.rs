use actix_web::HttpServer;
use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod http;
mod metrics;
mod store;

use config::Config;
use metrics::Metrics;
use store::{OrderStore, ScyllaOrderStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_service=debug")),
        )
        .init();

    tracing::info!("🚀 Starting order service");

    // === 1. Configuration ===
    let config = Config::from_env().context("invalid configuration")?;

    // === 2. Metrics registry ===
    let metrics = Arc::new(Metrics::new().context("failed to create metrics registry")?);
    tracing::info!(
        "📊 Metrics registry created with {} metric families",
        metrics.registry().gather().len()
    );

    // === 3. Order store ===
    // Serving without a backing store is pointless, so a failed initial
    // connection ends the process.
    let store: Arc<dyn OrderStore> = match ScyllaOrderStore::connect(&config.store).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "Order store connection error");
            return Err(e).context("order store unavailable at startup");
        }
    };

    // === 4. HTTP server ===
    let allowed_origin = config.allowed_origin.clone();
    tracing::info!(origin = %allowed_origin, "CORS policy configured");

    let server = HttpServer::new(move || {
        http::app(store.clone(), metrics.clone(), &allowed_origin)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;

    tracing::info!("Server running on {}:{}", config.host, config.port);

    server.run().await.context("HTTP server error")?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
