//! # Validation Module
//!
//! Input validation and normalisation for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell / Frontend                                             │
//! │  ├── Raw text from forms and prompts                                   │
//! │  └── parse_stock_input: floor + clamp to >= 0                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: App Command                                                  │
//! │  └── THIS MODULE: names, search terms                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory Store                                              │
//! │  └── Accepts whatever it is given (no invariant enforcement)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{parse_stock_input, validate_item_name};
//!
//! assert!(validate_item_name("Cable ties").is_ok());
//! assert_eq!(parse_stock_input("quantity", "4.7").unwrap(), 4);
//! assert_eq!(parse_stock_input("quantity", "-3").unwrap(), 0);
//! ```

use crate::error::ValidationError;
use crate::stock::StockLevels;
use crate::{MAX_CATEGORY_NAME_LEN, MAX_ITEM_NAME_LEN, MAX_SEARCH_LEN, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str, max: usize) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters (Hebrew counts per character, not per byte)
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name, MAX_ITEM_NAME_LEN)
}

/// Validates a category name.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    validate_name("category name", name, MAX_CATEGORY_NAME_LEN)
}

/// Validates a search term and returns it trimmed.
///
/// An empty term is allowed and means "show everything".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Normalisation
// =============================================================================

/// Turns a typed stock value into a non-negative whole number.
///
/// Fractions are floored and negatives become zero, matching what the
/// add-item dialog and the manage tab do with their number inputs.
/// Values above [`MAX_STOCK`] are rejected.
pub fn normalize_stock(field: &str, value: f64) -> ValidationResult<i64> {
    if !value.is_finite() {
        return Ok(0);
    }
    let value = value.floor();
    if value > MAX_STOCK as f64 {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_STOCK,
        });
    }
    Ok((value as i64).max(0))
}

/// Parses a typed stock value, then normalises it.
///
/// ## Rules
/// - Empty input counts as 0
/// - Anything that is not a number is rejected
pub fn parse_stock_input(field: &str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(0);
    }

    let value: f64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a number", raw),
    })?;

    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    normalize_stock(field, value)
}

/// Reports level combinations that break the expected invariant.
///
/// The store never rejects these; this is for warnings only.
pub fn check_levels(levels: &StockLevels) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    if levels.current_stock < 0 {
        problems.push(ValidationError::Negative {
            field: "currentStock".to_string(),
        });
    }

    if levels.threshold < 0 {
        problems.push(ValidationError::Negative {
            field: "threshold".to_string(),
        });
    }

    if levels.threshold > levels.ideal_stock {
        problems.push(ValidationError::OutOfRange {
            field: "threshold".to_string(),
            min: 0,
            max: levels.ideal_stock,
        });
    }

    problems
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Cable ties").is_ok());
        assert!(validate_item_name("כפפות ניטריל").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 150 Hebrew letters are 300 bytes but only 150 characters
        assert!(validate_item_name(&"א".repeat(150)).is_ok());
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("Safety").is_ok());
        assert!(validate_category_name("").is_err());
        assert!(validate_category_name(&"B".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  tape ").unwrap(), "tape");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_normalize_stock() {
        assert_eq!(normalize_stock("stock", 4.9).unwrap(), 4);
        assert_eq!(normalize_stock("stock", -2.0).unwrap(), 0);
        assert_eq!(normalize_stock("stock", f64::NAN).unwrap(), 0);
        assert_eq!(
            normalize_stock("stock", MAX_STOCK as f64 + 0.5).unwrap(),
            MAX_STOCK
        );
    }

    #[test]
    fn test_huge_stock_is_rejected() {
        assert!(matches!(
            normalize_stock("current", 1e30),
            Err(ValidationError::TooLarge { max: MAX_STOCK, .. })
        ));
        assert!(parse_stock_input("ideal", "9223372036854775807").is_err());
    }

    #[test]
    fn test_parse_stock_input() {
        assert_eq!(parse_stock_input("stock", "12").unwrap(), 12);
        assert_eq!(parse_stock_input("stock", "").unwrap(), 0);
        assert_eq!(parse_stock_input("stock", "-1.5").unwrap(), 0);
        assert!(parse_stock_input("stock", "ten").is_err());
        assert!(parse_stock_input("stock", "inf").is_err());
    }

    #[test]
    fn test_check_levels() {
        assert!(check_levels(&StockLevels::new(3, 10, 2)).is_empty());
        assert_eq!(check_levels(&StockLevels::new(-1, 10, 2)).len(), 1);
        assert_eq!(check_levels(&StockLevels::new(3, 2, 5)).len(), 1);
    }
}
