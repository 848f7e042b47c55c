//! # API Error Type
//!
//! Unified error type for app commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Shell / Frontend            Rust Backend                               │
//! │  ────────────────            ────────────                               │
//! │                                                                         │
//! │  adjust 1700000000000 -3                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── StoreError::Io(...) ───────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Domain Error? ──── CoreError::Forbidden ──────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── { "code": "NOT_FOUND", "message": "Item not found: 17..." }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockroom_core::{CoreError, ValidationError};
use stockroom_store::StoreError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "FORBIDDEN",
///   "message": "Requires admin role"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item or category does not exist
    NotFound,

    /// Input validation failed, or a stock step was refused
    ValidationError,

    /// Local storage could not be read or written
    StorageError,

    /// Not signed in, or wrong credentials
    Unauthorized,

    /// Signed in without the required role
    Forbidden,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io(e) => {
                tracing::error!("Storage I/O failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Could not write local storage")
            }
            StoreError::Serialization(e) => {
                tracing::error!("Serialization failed: {}", e);
                ApiError::new(ErrorCode::Internal, "Could not encode data")
            }
            StoreError::Corrupt { key, reason } => {
                tracing::error!(key = %key, "Corrupt stored value: {}", reason);
                ApiError::new(ErrorCode::StorageError, format!("Stored '{}' is unreadable", key))
            }
            StoreError::Unavailable(reason) => {
                ApiError::new(ErrorCode::StorageError, format!("Storage unavailable: {}", reason))
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => ApiError::not_found("Item", &id),
            CoreError::CategoryNotFound(id) => ApiError::not_found("Category", &id),
            CoreError::InvalidCredentials | CoreError::Unauthenticated => {
                ApiError::unauthorized(err.to_string())
            }
            CoreError::Forbidden { .. } => ApiError::new(ErrorCode::Forbidden, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Spreadsheet(e) => {
                tracing::error!("Spreadsheet export failed: {}", e);
                ApiError::internal("Could not build the spreadsheet")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
