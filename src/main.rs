//! Client Lanes API
//!
//! HTTP service for managing clients across three ordered workflow
//! lanes.
//!
//! # Environment Variables
//!
//! - `STORE_MODE`: `sqlite` (default) | `in_memory`
//! - `DATABASE_URL`: SQLite connection URL (default: `sqlite://clients.db?mode=rwc`)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `client_lanes_api=debug`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)

use std::env;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client_lanes_api::api::{AppState, router};
use client_lanes_api::infrastructure::{StoreConfig, init_store};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "client_lanes_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Client Lanes API");

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            std::process::exit(1);
        }
    };

    tracing::info!(mode = ?config.mode, "Store configuration loaded");

    let store = match init_store(&config).await {
        Ok(store) => {
            tracing::info!("Store initialized");
            store
        }
        Err(error) => {
            tracing::error!("Failed to initialize store: {}", error);
            std::process::exit(1);
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let application = router(AppState::new(store))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3000);

    let address: SocketAddr = match format!("{host}:{port}").parse() {
        Ok(address) => address,
        Err(error) => {
            tracing::error!(%error, "Invalid server address: {}:{}", host, port);
            std::process::exit(1);
        }
    };

    let listener = match TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

/// Handles graceful shutdown signals (SIGINT, SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(error) => {
                tracing::warn!(%error, "Failed to install Ctrl+C handler");
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
