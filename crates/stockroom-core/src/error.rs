//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Domain and access errors                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-store errors (separate crate)                               │
//! │  └── StoreError       - Storage read/write failures                    │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the shell/frontend sees (serialized)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::auth::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No item with this id.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// No category with this id.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Email/password pair did not match any account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The operation needs a signed-in user.
    ///
    /// ## When This Occurs
    /// - Opening the dashboard before logging in
    /// - Session was cleared by logout
    #[error("Not signed in")]
    Unauthenticated,

    /// The signed-in user lacks the required role.
    #[error("Requires {required} role")]
    Forbidden { required: Role },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The spreadsheet writer failed to build the workbook.
    #[error("Spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Numeric value is above the accepted maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., a stock value that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound("1700000000000".to_string());
        assert_eq!(err.to_string(), "Item not found: 1700000000000");

        let err = CoreError::Forbidden {
            required: Role::Admin,
        };
        assert_eq!(err.to_string(), "Requires admin role");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "threshold".to_string(),
        };
        assert_eq!(err.to_string(), "threshold must not be negative");

        let err = ValidationError::TooLarge {
            field: "current".to_string(),
            max: 1_000_000_000,
        };
        assert_eq!(err.to_string(), "current must be at most 1000000000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
