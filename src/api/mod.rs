//! API module for HTTP handlers.
//!
//! This module contains route definitions, request/response DTOs, and
//! error mapping.

pub mod dto;
pub mod error;
pub mod handlers;

pub use dto::{
    ClientResponse, CreateClientRequest, CreatedResponse, ListClientsQuery, RawNumber,
    UpdateClientRequest,
};
pub use error::{ApiError, ApiErrorResponse};
pub use handlers::{
    AppState, HealthResponse, create_client, get_client, greeting, health_check, list_clients,
    update_client,
};

use axum::Router;
use axum::routing::get;

/// Builds the application router.
///
/// Layers (tracing, CORS) are applied by the caller so tests can drive
/// the bare routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(greeting).post(create_client))
        .route("/health", get(health_check))
        .route("/api/v1/clients", get(list_clients))
        .route(
            "/api/v1/clients/{id}",
            get(get_client).put(update_client),
        )
        .with_state(state)
}
