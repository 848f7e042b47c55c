//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  InventoryItem  │   │    Category     │   │  HistoryEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id, date       │       │
//! │  │  name           │◄──│  name           │   │  itemId/Name    │       │
//! │  │  category (id)  │   └─────────────────┘   │  action         │       │
//! │  │  currentStock   │                         │  quantity?      │       │
//! │  │  idealStock     │                         │  previous/new?  │       │
//! │  │  threshold      │                         │  user           │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Layout
//! Field names serialize as camelCase so the JSON blobs kept in local storage
//! read the same as the ones the browser frontend writes.
//!
//! `item.category` is a plain id string. Nothing checks that the category
//! exists, so orphaned references are possible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::stock::StockLevels;

// =============================================================================
// Inventory Item
// =============================================================================

/// A tracked inventory item.
///
/// The levels are expected to satisfy `0 <= current_stock` and
/// `0 <= threshold <= ideal_stock`, but the store does not enforce it.
/// See [`crate::validation::check_levels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Timestamp-derived identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Id of the category this item belongs to.
    pub category: String,

    /// Units on hand.
    pub current_stock: i64,

    /// Units the shelf should hold when fully stocked.
    pub ideal_stock: i64,

    /// At or below this level the item counts as low stock.
    pub threshold: i64,
}

impl InventoryItem {
    /// Returns true when the item is at or below its threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.threshold
    }

    /// Status shown in the admin table.
    pub fn status(&self) -> ItemStatus {
        if self.is_low_stock() {
            ItemStatus::Low
        } else {
            ItemStatus::Ok
        }
    }

    /// Returns the three stock levels as one value.
    pub fn levels(&self) -> StockLevels {
        StockLevels {
            current_stock: self.current_stock,
            ideal_stock: self.ideal_stock,
            threshold: self.threshold,
        }
    }

    /// Returns a copy with the present fields of `update` merged in.
    pub fn merged(&self, update: &ItemUpdate) -> InventoryItem {
        InventoryItem {
            id: self.id.clone(),
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            category: update
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            current_stock: update.current_stock.unwrap_or(self.current_stock),
            ideal_stock: update.ideal_stock.unwrap_or(self.ideal_stock),
            threshold: update.threshold.unwrap_or(self.threshold),
        }
    }
}

/// Stock status of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Above the threshold.
    Ok,
    /// At or below the threshold.
    Low,
}

// =============================================================================
// Item Input
// =============================================================================

/// Input for creating an item. Absent fields default to `""` or `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct NewItem {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current_stock: Option<i64>,
    pub ideal_stock: Option<i64>,
    pub threshold: Option<i64>,
}

impl NewItem {
    /// Builds the stored item under the given id.
    pub fn into_item(self, id: String) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            current_stock: self.current_stock.unwrap_or(0),
            ideal_stock: self.ideal_stock.unwrap_or(0),
            threshold: self.threshold.unwrap_or(0),
        }
    }
}

/// Partial update for an existing item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current_stock: Option<i64>,
    pub ideal_stock: Option<i64>,
    pub threshold: Option<i64>,
}

impl ItemUpdate {
    /// An update that only sets the current stock.
    pub fn stock(current_stock: i64) -> Self {
        ItemUpdate {
            current_stock: Some(current_stock),
            ..Default::default()
        }
    }

    /// An update that sets all three levels.
    pub fn levels(levels: StockLevels) -> Self {
        ItemUpdate {
            current_stock: Some(levels.current_stock),
            ideal_stock: Some(levels.ideal_stock),
            threshold: Some(levels.threshold),
            ..Default::default()
        }
    }

    /// Returns true when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.current_stock.is_none()
            && self.ideal_stock.is_none()
            && self.threshold.is_none()
    }
}

// =============================================================================
// Category
// =============================================================================

/// A category that groups items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Input for creating a category. An absent name defaults to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct NewCategory {
    pub name: Option<String>,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        NewCategory {
            name: Some(name.into()),
        }
    }
}

// =============================================================================
// History
// =============================================================================

/// Kind of change recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// Item was created.
    Create,
    /// Non-stock fields changed.
    Update,
    /// Stock went up.
    Add,
    /// Stock went down.
    Remove,
    /// Item was deleted (reserved; no operation produces it yet).
    Delete,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Create => "create",
            HistoryAction::Update => "update",
            HistoryAction::Add => "add",
            HistoryAction::Remove => "remove",
            HistoryAction::Delete => "delete",
        }
    }

    /// Translation key for the action label.
    pub fn translation_key(&self) -> String {
        format!("inventory.history.actions.{}", self.as_str())
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot stored in `previousValue` / `newValue`.
///
/// Stock changes store the bare number, other changes store the whole item.
/// Serialized untagged so it reads as either a JSON number or an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum HistoryValue {
    Stock(i64),
    Item(InventoryItem),
}

/// One row of the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,

    /// When the change happened.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Item id at the time of the change.
    pub item_id: String,

    /// Item name at the time of the change (frozen).
    pub item_name: String,

    pub action: HistoryAction,

    /// Absolute stock delta for `add` / `remove`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<HistoryValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<HistoryValue>,

    /// Who made the change.
    pub user: String,
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// The three counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: usize,
    pub low_stock_count: usize,
    pub category_count: usize,
}

impl InventoryStats {
    /// Computes the counters from snapshots.
    pub fn compute(items: &[InventoryItem], categories: &[Category]) -> Self {
        InventoryStats {
            total_items: items.len(),
            low_stock_count: items.iter().filter(|i| i.is_low_stock()).count(),
            category_count: categories.len(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
