//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are separate from the domain model: `lane` travels as
//! `status`, `rank` as `priority`, and numeric fields tolerate string
//! encodings (`"priority": "3"`), which the validators funnel into
//! domain types.

use serde::{Deserialize, Serialize};

use crate::domain::{Client, ClientId, Lane, Rank, ValidateError};

// =============================================================================
// Wire Numbers
// =============================================================================

/// A number as it may arrive on the wire: a JSON integer, a float, or
/// a numeric string. Whether it is an acceptable integer is the
/// validator's call, so malformed input becomes a domain error rather
/// than a body-parse rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A JSON integer.
    Int(i64),
    /// A JSON float; integral values (e.g. `3.0`) are accepted.
    Float(f64),
    /// A string, possibly numeric.
    Text(String),
}

impl RawNumber {
    /// Returns the integer value, if this is one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value)
                if value.is_finite()
                    && value.fract() == 0.0
                    && (i64::MIN as f64..=i64::MAX as f64).contains(value) =>
            {
                Some(*value as i64)
            }
            Self::Float(_) => None,
            Self::Text(raw) => raw.trim().parse::<i64>().ok(),
        }
    }

    fn raw_display(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(raw) => raw.clone(),
        }
    }
}

/// Validates a priority value from the wire.
///
/// Out-of-range values are not an error: the reorder engine clamps
/// them. Only input that fails to parse as an integer is rejected.
///
/// # Errors
///
/// Returns [`ValidateError::PriorityNotANumber`] for non-numeric input.
pub fn validate_priority(raw: &RawNumber) -> Result<Rank, ValidateError> {
    raw.as_integer()
        .map(Rank::new)
        .ok_or_else(|| ValidateError::PriorityNotANumber(raw.raw_display()))
}

/// Validates an id value from a request body.
///
/// # Errors
///
/// Returns [`ValidateError::IdNotANumber`] for non-numeric input.
pub fn validate_id(raw: &RawNumber) -> Result<ClientId, ValidateError> {
    raw.as_integer()
        .map(ClientId::new)
        .ok_or_else(|| ValidateError::IdNotANumber(raw.raw_display()))
}

// =============================================================================
// Requests
// =============================================================================

/// Request DTO for creating a client (POST `/`).
///
/// All five fields are required and inserted verbatim; the create path
/// performs no lane-normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientRequest {
    /// Caller-supplied id.
    pub id: RawNumber,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Lane name.
    pub status: String,
    /// Rank within the lane.
    pub priority: RawNumber,
}

/// Request DTO for moving a client (PUT `/api/v1/clients/:id`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClientRequest {
    /// New lane, if the client should change lanes.
    #[serde(default)]
    pub status: Option<String>,
    /// New rank, if the client should change position.
    #[serde(default)]
    pub priority: Option<RawNumber>,
}

/// Query parameters for listing clients (GET `/api/v1/clients`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListClientsQuery {
    /// Optional lane filter.
    #[serde(default)]
    pub status: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Response DTO for a client record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientResponse {
    /// Client id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Lane name.
    pub status: Lane,
    /// Rank within the lane.
    pub priority: i64,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.get(),
            name: client.name.clone(),
            description: client.description.clone(),
            status: client.lane,
            priority: client.rank.get(),
        }
    }
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self::from(&client)
    }
}

/// Response body for a successful create.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    /// Confirmation message.
    pub message: String,
}

// =============================================================================
// Tests
// =============================================================================
