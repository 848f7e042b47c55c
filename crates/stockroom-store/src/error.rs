//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the storage key as context            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in the app) ← STORAGE_ERROR for the shell                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A blob that fails to parse while *loading* is not an error: the store logs
//! it and starts that collection empty. Errors here come from writes, and
//! from reads the caller asked to be strict about.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory is missing and cannot be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be turned into JSON or back.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored blob exists but does not hold what was expected.
    #[error("Corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// The backend refused the operation (quota, read-only, poisoned lock).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
