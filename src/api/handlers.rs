//! HTTP handlers for the client lanes API.
//!
//! Each mutation loads the full snapshot, asks the reorder engine for a
//! new one, persists every record of the result in one transaction, and
//! re-reads before responding, so the caller always sees the canonical
//! (lane, rank) ordering.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use super::dto::{
    ClientResponse, CreateClientRequest, CreatedResponse, ListClientsQuery, UpdateClientRequest,
    validate_id, validate_priority,
};
use super::error::ApiErrorResponse;
use crate::domain::{Client, ClientId, Lane, ValidateError, reorder};
use crate::infrastructure::ClientStore;

/// Greeting served at the root path.
const GREETING: &str = "Hello World!";

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// The store is a trait object so the SQLite and in-memory backends can
/// be selected at runtime.
#[derive(Clone)]
pub struct AppState {
    /// Client store for persistence.
    pub store: Arc<dyn ClientStore>,
}

impl AppState {
    /// Creates a new `AppState` over an initialized store.
    #[must_use]
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self { store }
    }
}

// =============================================================================
// GET / Handler
// =============================================================================

/// Static greeting.
pub async fn greeting() -> &'static str {
    GREETING
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint for load balancers and orchestration systems.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// POST / Handler
// =============================================================================

/// Creates a new client.
///
/// The five fields are inserted exactly as given; no lane-normalization
/// happens on create, so a caller can seed a board with any ranks it
/// likes. The id must parse as an integer and be unused.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] (400) for a malformed id/priority, an
/// unknown status, or a store rejection such as a duplicate id.
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiErrorResponse> {
    let id = validate_id(&request.id)?;
    let lane = Lane::parse(&request.status)?;
    let rank = validate_priority(&request.priority)?;

    let client = Client::new(id, request.name, request.description, lane, rank);
    state.store.insert(&client).await?;

    tracing::debug!(id = %client.id, lane = %client.lane, "client created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "New client created.".to_string(),
        }),
    ))
}

// =============================================================================
// GET /api/v1/clients Handler
// =============================================================================

/// Lists clients, optionally filtered by lane.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] (400) if the `status` filter is not one
/// of the three lane names.
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListClientsQuery>,
) -> Result<Json<Vec<ClientResponse>>, ApiErrorResponse> {
    let clients = match query.status.as_deref() {
        Some(raw) => {
            let lane = Lane::parse(raw)?;
            state.store.list_by_lane(lane).await?
        }
        None => state.store.list_ordered().await?,
    };

    Ok(Json(clients.iter().map(ClientResponse::from).collect()))
}

// =============================================================================
// GET /api/v1/clients/:id Handler
// =============================================================================

/// Fetches a single client by id.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] (400) if the id does not parse or does
/// not resolve; the handler returns immediately on failure, one request
/// one response.
pub async fn get_client(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ClientResponse>, ApiErrorResponse> {
    let client = resolve_client(state.store.as_ref(), &raw_id).await?;
    Ok(Json(ClientResponse::from(&client)))
}

// =============================================================================
// PUT /api/v1/clients/:id Handler
// =============================================================================

/// Moves a client to a new lane and/or rank.
///
/// Both fields are independently optional: lane-only moves append to
/// the destination lane, rank-only moves shift within the current lane,
/// and an empty body re-persists the snapshot unchanged. Requested
/// ranks are clamped into the lane, never rejected.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] (400) if the id does not resolve, the
/// status is not a lane name, or the priority is not numeric; 500 if
/// the store fails.
pub async fn update_client(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<Vec<ClientResponse>>, ApiErrorResponse> {
    let target = resolve_client(state.store.as_ref(), &raw_id).await?;

    let new_lane = request
        .status
        .as_deref()
        .map(Lane::parse)
        .transpose()?;
    let new_rank = request
        .priority
        .as_ref()
        .map(validate_priority)
        .transpose()?;

    let snapshot = state.store.list_ordered().await?;
    let reordered = reorder(snapshot, target.id, new_lane, new_rank);
    state.store.replace_all(&reordered).await?;

    tracing::debug!(
        id = %target.id,
        status = ?new_lane,
        priority = ?new_rank,
        "client reordered"
    );

    let fresh = state.store.list_ordered().await?;
    Ok(Json(fresh.iter().map(ClientResponse::from).collect()))
}

// =============================================================================
// Validation Helpers
// =============================================================================

/// Parses a raw path id and resolves it against the store.
///
/// # Errors
///
/// [`ValidateError::IdNotANumber`] if the id does not parse,
/// [`ValidateError::NotFound`] if no client holds it.
async fn resolve_client(
    store: &dyn ClientStore,
    raw_id: &str,
) -> Result<Client, ApiErrorResponse> {
    let id = ClientId::parse(raw_id)?;
    let client = store.find(id).await?;
    client.ok_or_else(|| ValidateError::NotFound(id).into())
}

// =============================================================================
// Tests
// =============================================================================
