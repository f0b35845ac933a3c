//! Application error type and its HTTP mapping.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::{StoreError, UniqueField};

/// Message returned when no mapping exists for a short id.
pub const MSG_NOT_FOUND: &str = "No redirection registered for the specified ID!";
/// Message returned when the redirect path carries no short id.
pub const MSG_ID_MISSING: &str = "Redirection ID not specified!";
/// Message returned when a create/update omits the long URL.
pub const MSG_URL_MISSING: &str = "Redirection target URL not specified!";
/// Message returned when the short id is already registered.
pub const MSG_ID_TAKEN: &str = "A redirection has already been registered for the specified ID!";
/// Message returned when the long URL is already registered under another id.
pub const MSG_URL_TAKEN: &str = "Unable to register redirection due to prior registration!";
/// Message returned when an update payload names a different short id.
pub const MSG_ID_MISMATCH: &str = "Mismatch between entity ID and request ID!";

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Error outcome of a registry or resolver operation.
///
/// Each variant carries the client-facing `message` and structured `details`
/// that are only written to logs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// HTTP status the transport layer reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::StoreUnavailable { message, details } => {
                tracing::error!(reason = %message, %details, "Store unavailable");
                "Internal server error".to_string()
            }
            AppError::InvalidInput { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. } => message,
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateKey {
                field: UniqueField::ShortId,
            } => AppError::conflict(MSG_ID_TAKEN, json!({ "constraint": "short_id" })),
            StoreError::DuplicateKey {
                field: UniqueField::LongUrl,
            } => AppError::conflict(MSG_URL_TAKEN, json!({ "constraint": "long_url" })),
            StoreError::NotFound => AppError::not_found(MSG_NOT_FOUND, json!({})),
            StoreError::Unavailable(reason) => {
                AppError::store_unavailable("Store error", json!({ "reason": reason }))
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_input(
            rejection.body_text(),
            json!({ "status": rejection.status().as_u16() }),
        )
    }
}
