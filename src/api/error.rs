//! API error handling.
//!
//! Two error body shapes exist on the wire: validator failures carry
//! `{message, long_message}`, while create-path rejections and
//! infrastructure failures carry `{error}`. One [`ApiErrorResponse`]
//! type covers both, so handlers can `?` any domain or store error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::ValidateError;
use crate::infrastructure::StoreError;

// =============================================================================
// API Error
// =============================================================================

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiError {
    /// Validator-style body: `{message, long_message}`.
    Validation {
        /// Short error message.
        message: String,
        /// Longer explanation of what went wrong.
        long_message: String,
    },
    /// Rejection-style body: `{error}`.
    Rejection {
        /// The error description.
        error: String,
    },
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 Bad Request response with a validator-style body.
    #[must_use]
    pub fn validation(message: impl Into<String>, long_message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::Validation {
                message: message.into(),
                long_message: long_message.into(),
            },
        }
    }

    /// Creates a 400 Bad Request response with a rejection-style body.
    #[must_use]
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::Rejection {
                error: error.into(),
            },
        }
    }

    /// Creates a 500 Internal Server Error response with a generic
    /// body. Details never reach the client; callers log them.
    #[must_use]
    pub fn internal_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::Rejection {
                error: "An internal error occurred.".to_string(),
            },
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ValidateError> for ApiErrorResponse {
    fn from(error: ValidateError) -> Self {
        match error {
            ValidateError::IdNotANumber(_) => {
                Self::validation("Invalid id provided.", "Id can only be an integer.")
            }
            ValidateError::NotFound(_) => Self::validation(
                "Invalid id provided.",
                "Cannot find client with that id.",
            ),
            ValidateError::PriorityNotANumber(_) => Self::validation(
                "Invalid priority provided.",
                "Priority can only be a positive integer.",
            ),
            ValidateError::UnknownStatus(_) => Self::validation(
                "Invalid status provided.",
                "Status can only be one of the following: backlog | in-progress | complete.",
            ),
        }
    }
}

impl From<StoreError> for ApiErrorResponse {
    fn from(error: StoreError) -> Self {
        match error {
            // Constraint violations are caller errors and keep the
            // store's message on the wire.
            StoreError::Rejected(message) => Self::rejected(message),
            StoreError::Database(message) => {
                tracing::error!(error = %message, "store failure");
                Self::internal_error()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
