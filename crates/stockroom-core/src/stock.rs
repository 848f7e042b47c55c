//! # Stock Level Rules
//!
//! The rules the inventory tabs apply before handing levels to the store.
//!
//! ## Where Each Rule Applies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View tab        +1 only while current < ideal, -1 only while > 0      │
//! │                                                                         │
//! │  Manage tab      current += amount, clamped at 0, skipped if unchanged │
//! │                                                                         │
//! │  Settings tab    per-field steppers, then sanitize before saving:      │
//! │                  current >= 0, ideal >= 1, 0 <= threshold <= ideal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The three stock levels of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockLevels {
    pub current_stock: i64,
    pub ideal_stock: i64,
    pub threshold: i64,
}

/// Which level a settings stepper edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum LevelField {
    CurrentStock,
    IdealStock,
    Threshold,
}

impl std::str::FromStr for LevelField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" | "currentstock" | "stock" => Ok(LevelField::CurrentStock),
            "ideal" | "idealstock" => Ok(LevelField::IdealStock),
            "threshold" => Ok(LevelField::Threshold),
            other => Err(format!(
                "Unknown level '{}'. Valid options: current, ideal, threshold",
                other
            )),
        }
    }
}

impl StockLevels {
    pub fn new(current_stock: i64, ideal_stock: i64, threshold: i64) -> Self {
        StockLevels {
            current_stock,
            ideal_stock,
            threshold,
        }
    }

    fn get(&self, field: LevelField) -> i64 {
        match field {
            LevelField::CurrentStock => self.current_stock,
            LevelField::IdealStock => self.ideal_stock,
            LevelField::Threshold => self.threshold,
        }
    }

    fn get_mut(&mut self, field: LevelField) -> &mut i64 {
        match field {
            LevelField::CurrentStock => &mut self.current_stock,
            LevelField::IdealStock => &mut self.ideal_stock,
            LevelField::Threshold => &mut self.threshold,
        }
    }

    /// Settings-tab `+` stepper. The threshold cannot pass the ideal level.
    ///
    /// Returns false when the step was refused.
    pub fn increment(&mut self, field: LevelField) -> bool {
        if field == LevelField::Threshold && self.threshold >= self.ideal_stock {
            return false;
        }
        let Some(value) = self.get(field).checked_add(1) else {
            return false;
        };
        *self.get_mut(field) = value;
        *self = self.sanitized();
        true
    }

    /// Settings-tab `-` stepper. Nothing goes below zero, and lowering the
    /// ideal level onto the threshold drags the threshold down with it.
    ///
    /// Returns false when the step was refused.
    pub fn decrement(&mut self, field: LevelField) -> bool {
        if self.get(field) <= 0 {
            return false;
        }
        let Some(value) = self.get(field).checked_sub(1) else {
            return false;
        };
        if field == LevelField::IdealStock && self.ideal_stock <= self.threshold {
            self.threshold = value;
        }
        *self.get_mut(field) = value;
        *self = self.sanitized();
        true
    }

    /// Clamps the levels the way the settings tab does before saving.
    pub fn sanitized(&self) -> StockLevels {
        let ideal_stock = self.ideal_stock.max(1);
        StockLevels {
            current_stock: self.current_stock.max(0),
            ideal_stock,
            threshold: self.threshold.min(ideal_stock).max(0),
        }
    }
}

/// View tab: can the `+` button be pressed?
#[inline]
pub fn can_increment(current_stock: i64, ideal_stock: i64) -> bool {
    current_stock < ideal_stock
}

/// View tab: can the `-` button be pressed?
#[inline]
pub fn can_decrement(current_stock: i64) -> bool {
    current_stock > 0
}

/// Manage tab: stock after adding `amount` (may be negative), floored at 0.
#[inline]
pub fn adjusted_stock(current_stock: i64, amount: i64) -> i64 {
    current_stock.saturating_add(amount).max(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_cannot_pass_ideal() {
        let mut levels = StockLevels::new(3, 5, 5);
        assert!(!levels.increment(LevelField::Threshold));
        assert_eq!(levels.threshold, 5);

        let mut levels = StockLevels::new(3, 5, 4);
        assert!(levels.increment(LevelField::Threshold));
        assert_eq!(levels.threshold, 5);
    }

    #[test]
    fn test_decrement_stops_at_zero() {
        let mut levels = StockLevels::new(0, 5, 2);
        assert!(!levels.decrement(LevelField::CurrentStock));
        assert_eq!(levels.current_stock, 0);
    }

    #[test]
    fn test_lowering_ideal_drags_threshold() {
        let mut levels = StockLevels::new(3, 4, 4);
        assert!(levels.decrement(LevelField::IdealStock));
        assert_eq!(levels.ideal_stock, 3);
        assert_eq!(levels.threshold, 3);
    }

    #[test]
    fn test_ideal_never_drops_below_one() {
        let mut levels = StockLevels::new(0, 1, 0);
        assert!(levels.decrement(LevelField::IdealStock));
        assert_eq!(levels.ideal_stock, 1);
    }

    #[test]
    fn test_step_at_i64_max_is_refused() {
        let mut levels = StockLevels::new(i64::MAX, i64::MAX, 0);
        assert!(!levels.increment(LevelField::CurrentStock));
        assert!(!levels.increment(LevelField::IdealStock));
        assert_eq!(levels.current_stock, i64::MAX);

        assert!(levels.decrement(LevelField::CurrentStock));
        assert_eq!(levels.current_stock, i64::MAX - 1);
    }

    #[test]
    fn test_sanitized() {
        let levels = StockLevels::new(-3, 0, 9).sanitized();
        assert_eq!(levels, StockLevels::new(0, 1, 1));
    }

    #[test]
    fn test_view_tab_buttons() {
        assert!(can_increment(4, 5));
        assert!(!can_increment(5, 5));
        assert!(can_decrement(1));
        assert!(!can_decrement(0));
    }

    #[test]
    fn test_adjusted_stock_floors_at_zero() {
        assert_eq!(adjusted_stock(3, 2), 5);
        assert_eq!(adjusted_stock(3, -5), 0);
    }

    #[test]
    fn test_level_field_from_str() {
        assert_eq!("ideal".parse::<LevelField>().unwrap(), LevelField::IdealStock);
        assert_eq!("Threshold".parse::<LevelField>().unwrap(), LevelField::Threshold);
        assert!("colour".parse::<LevelField>().is_err());
    }
}
