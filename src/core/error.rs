//! Typed error handling for the order desk
//!
//! Repository operations report exactly two kinds of failure:
//!
//! - [`StoreError::NotFound`]: an id-keyed lookup missed. This is the only
//!   domain error; over-allocation and unknown products are absorbed by the
//!   inventory ledger instead.
//! - [`StoreError::Storage`]: loading or saving the snapshot failed. See
//!   [`StorageError`] for the backend-level breakdown.
//!
//! [`StoreError::Validation`] is raised only by the REST exposure when a
//! request carries unusable input.
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.get(order_id).await {
//!     Ok(order) => println!("Found: {:?}", order),
//!     Err(StoreError::NotFound { id, .. }) => println!("Order {} not found", id),
//!     Err(e) => eprintln!("Storage failure: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

/// Entity type names used in [`StoreError::NotFound`]
pub const ORDER: &str = "order";
pub const PRODUCT: &str = "product";

/// The main error type for repository and snapshot operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this id exists
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    /// Persisted snapshot could not be read or written
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Request input rejected at the REST boundary
    #[error("Validation error for field '{field}': {message}")]
    Validation { field: String, message: String },
}

/// Errors raised by snapshot persistence backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed
    #[error("I/O error on '{location}': {message}")]
    Io { location: String, message: String },

    /// Persisted data exists but is not a valid snapshot
    #[error("Corrupted snapshot at '{location}': {message}")]
    Corrupted { location: String, message: String },

    /// In-memory snapshot could not be encoded
    #[error("Failed to serialize snapshot: {message}")]
    Serialization { message: String },

    /// Backend can no longer be used (poisoned lock, closed handle)
    #[error("Storage backend '{backend}' is unavailable: {message}")]
    Unavailable { backend: String, message: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl StoreError {
    /// Shorthand for a missing order
    pub fn order_not_found(id: Uuid) -> Self {
        StoreError::NotFound {
            entity_type: ORDER,
            id,
        }
    }

    /// Shorthand for a missing product
    pub fn product_not_found(id: Uuid) -> Self {
        StoreError::NotFound {
            entity_type: PRODUCT,
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Validation { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { entity_type, .. } if *entity_type == PRODUCT => {
                "PRODUCT_NOT_FOUND"
            }
            StoreError::NotFound { .. } => "ORDER_NOT_FOUND",
            StoreError::Storage(e) => e.error_code(),
            StoreError::Validation { .. } => "VALIDATION_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            StoreError::NotFound { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id.to_string()
            })),
            StoreError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            StoreError::Storage(_) => None,
        }
    }
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Io { .. } => "STORAGE_IO_ERROR",
            StorageError::Corrupted { .. } => "STORAGE_CORRUPTED",
            StorageError::Serialization { .. } => "STORAGE_SERIALIZATION_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let message = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("request".to_string(), errors.to_string()));

        StoreError::Validation { field, message }
    }
}

/// A specialized Result type for repository operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A specialized Result type for persistence backends
pub type StorageResult<T> = Result<T, StorageError>;
