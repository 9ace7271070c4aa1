//! # API Error Type
//!
//! Unified error type for REST handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow                                      │
//! │                                                                     │
//! │  ValidationError (core) ──┐                                         │
//! │                           ├──► ApiError ──► HTTP status + {error}   │
//! │  DbError (db)        ─────┘         │                               │
//! │                                     ▼                               │
//! │            Internal detail is logged server-side only;              │
//! │            the client sees a generic message.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Mapping
//! - `Validation`, `Conflict` → 400
//! - `Unauthorized` → 401
//! - `Forbidden` → 403
//! - `NotFound` → 404
//! - `InsufficientStock`, `Internal` → 500

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use bodega_core::ValidationError;
use bodega_db::DbError;

/// API error returned from REST handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input validation failed (400).
    #[error("{0}")]
    Validation(String),

    /// Duplicate unique field or conflicting reference (400).
    #[error("{0}")]
    Conflict(String),

    /// Missing or absent credentials (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Credentials present but not sufficient (403).
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found (404). Carries the entity name.
    #[error("{0} not found")]
    NotFound(String),

    /// A checkout line could not be covered by stock (500, with the
    /// descriptive message as the operation's failure reason).
    #[error("{0}")]
    InsufficientStock(String),

    /// Unexpected failure (500). The payload is logged, never sent.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Creates a not-found error for the given entity name.
    pub fn not_found(entity: impl Into<String>) -> Self {
        ApiError::NotFound(entity.into())
    }

    /// Creates an internal error; the detail is only logged.
    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal(detail.into())
    }
}

/// JSON body every error response carries.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) | ApiError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::InsufficientStock(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, .. } => ApiError::NotFound(entity),
            DbError::UniqueViolation { field } => {
                ApiError::Conflict(duplicate_message(&field))
            }
            DbError::ForeignKeyViolation { message } => {
                error!(detail = %message, "Foreign key violation");
                ApiError::Conflict("Record is referenced by existing data".to_string())
            }
            DbError::InsufficientStock { .. } => ApiError::InsufficientStock(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Turns a constraint field like `products.barcode` into the message
/// the UI shows next to the offending form field.
fn duplicate_message(field: &str) -> String {
    if field.contains("username") {
        "Username already exists".to_string()
    } else if field.contains("barcode") {
        "Barcode already exists".to_string()
    } else {
        format!("Duplicate value for {}", field)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
