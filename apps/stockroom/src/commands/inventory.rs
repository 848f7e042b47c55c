//! # Inventory Commands
//!
//! Dashboard counters, item listing/search, item creation and the three
//! ways of changing stock (view-tab steppers, manage-tab amount, settings-tab
//! levels).
//!
//! ## Stock Change Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View tab       increment_stock / decrement_stock   (+1 / -1)          │
//! │  Manage tab     adjust_stock(amount)                (floored at 0)     │
//! │  Settings tab   save_levels(current, ideal, threshold)                 │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │              InventoryStore::update_item ──► history add/remove/update │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command here requires a signed-in user; the admin overview
//! requires the admin role.

use serde::{Deserialize, Serialize};
use tracing::debug;

use stockroom_core::query::{filter_items, group_by_category};
use stockroom_core::stock::{can_decrement, can_increment};
use stockroom_core::validation::{
    check_levels, normalize_stock, validate_item_name, validate_search_query,
};
use stockroom_core::{
    Category, CoreError, InventoryItem, InventoryStats, ItemStatus, LevelField, NewItem,
    StockLevels, ValidationError, MAX_STOCK,
};

use crate::commands::auth::{require_admin, require_user};
use crate::error::ApiError;
use crate::state::{InventoryState, SessionState};

/// Item DTO for the views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Resolved category name; empty when the category is gone.
    pub category_name: String,
    pub current_stock: i64,
    pub ideal_stock: i64,
    pub threshold: i64,
    pub status: ItemStatus,
    pub can_increment: bool,
    pub can_decrement: bool,
}

impl ItemDto {
    fn new(item: &InventoryItem, categories: &[Category]) -> Self {
        ItemDto {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            category_name: stockroom_core::query::category_name(categories, &item.category)
                .to_string(),
            current_stock: item.current_stock,
            ideal_stock: item.ideal_stock,
            threshold: item.threshold,
            status: item.status(),
            can_increment: can_increment(item.current_stock, item.ideal_stock),
            can_decrement: can_decrement(item.current_stock),
        }
    }
}

/// A category heading with its items, as the view tab lists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGroupDto {
    pub category_id: String,
    pub category_name: String,
    pub items: Vec<ItemDto>,
}

/// Admin overview: counters plus every item with its status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub stats: InventoryStats,
    pub items: Vec<ItemDto>,
}

/// Add-item dialog input. Numbers arrive as typed and are normalised here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub name: String,
    pub category: String,
    pub current_stock: f64,
    pub ideal_stock: f64,
    pub threshold: f64,
}

// =============================================================================
// Queries
// =============================================================================

/// Dashboard counters.
pub fn get_stats(
    session: &SessionState,
    inventory: &InventoryState,
) -> Result<InventoryStats, ApiError> {
    require_user(session)?;
    Ok(inventory.with_store(|store| store.stats()))
}

/// Items matching `query` by name or category name, in store order.
pub fn search_items(
    session: &SessionState,
    inventory: &InventoryState,
    query: &str,
) -> Result<Vec<ItemDto>, ApiError> {
    require_user(session)?;
    let query = validate_search_query(query)?;
    debug!(query = %query, "search_items command");

    let (items, categories) = inventory.with_store(|s| (s.items(), s.categories()));
    Ok(filter_items(&items, &categories, &query)
        .into_iter()
        .map(|item| ItemDto::new(item, &categories))
        .collect())
}

/// Matching items grouped under their categories, in category order.
pub fn grouped_items(
    session: &SessionState,
    inventory: &InventoryState,
    query: &str,
) -> Result<Vec<ItemGroupDto>, ApiError> {
    require_user(session)?;
    let query = validate_search_query(query)?;

    let (items, categories) = inventory.with_store(|s| (s.items(), s.categories()));
    let matches = filter_items(&items, &categories, &query);
    Ok(group_by_category(&categories, &matches)
        .into_iter()
        .map(|group| ItemGroupDto {
            category_id: group.category.id.clone(),
            category_name: group.category.name.clone(),
            items: group
                .items
                .into_iter()
                .map(|item| ItemDto::new(item, &categories))
                .collect(),
        })
        .collect())
}

/// Stats and all items, for admins only.
pub fn admin_overview(
    session: &SessionState,
    inventory: &InventoryState,
) -> Result<AdminOverview, ApiError> {
    require_admin(session)?;
    let (stats, items, categories) =
        inventory.with_store(|s| (s.stats(), s.items(), s.categories()));
    Ok(AdminOverview {
        stats,
        items: items
            .iter()
            .map(|item| ItemDto::new(item, &categories))
            .collect(),
    })
}

// =============================================================================
// Mutations
// =============================================================================

/// Adds an item from the add-item dialog.
///
/// ## Rules
/// - Name is required (trimmed, at most 200 characters)
/// - Category must exist
/// - Numbers are floored and clamped at 0, and may not exceed [`MAX_STOCK`]
pub fn add_item(
    session: &SessionState,
    inventory: &InventoryState,
    input: AddItemInput,
) -> Result<ItemDto, ApiError> {
    require_user(session)?;
    validate_item_name(&input.name)?;
    debug!(name = %input.name, category = %input.category, "add_item command");

    let new = NewItem {
        name: Some(input.name.trim().to_string()),
        category: Some(input.category.clone()),
        current_stock: Some(normalize_stock("currentStock", input.current_stock)?),
        ideal_stock: Some(normalize_stock("idealStock", input.ideal_stock)?),
        threshold: Some(normalize_stock("threshold", input.threshold)?),
    };

    inventory.with_store_mut(|store| {
        if store.category(&input.category).is_none() {
            return Err(CoreError::CategoryNotFound(input.category.clone()).into());
        }
        let item = store.add_item(new)?;
        for problem in check_levels(&item.levels()) {
            tracing::warn!(id = %item.id, problem = %problem, "Item saved with unusual levels");
        }
        Ok(ItemDto::new(&item, &store.categories()))
    })
}

fn item_not_found(id: &str) -> ApiError {
    CoreError::ItemNotFound(id.to_string()).into()
}

/// View-tab `+`: one more unit, refused at the ideal level.
pub fn increment_stock(
    session: &SessionState,
    inventory: &InventoryState,
    id: &str,
) -> Result<ItemDto, ApiError> {
    require_user(session)?;
    inventory.with_store_mut(|store| {
        let item = store.item(id).ok_or_else(|| item_not_found(id))?;
        if !can_increment(item.current_stock, item.ideal_stock) {
            return Err(ApiError::validation("Stock is already at its ideal level"));
        }
        let item = store
            .increment_stock(id)?
            .ok_or_else(|| item_not_found(id))?;
        Ok(ItemDto::new(&item, &store.categories()))
    })
}

/// View-tab `-`: one less unit, refused at zero.
pub fn decrement_stock(
    session: &SessionState,
    inventory: &InventoryState,
    id: &str,
) -> Result<ItemDto, ApiError> {
    require_user(session)?;
    inventory.with_store_mut(|store| {
        let item = store.item(id).ok_or_else(|| item_not_found(id))?;
        if !can_decrement(item.current_stock) {
            return Err(ApiError::validation("Stock is already at zero"));
        }
        let item = store
            .decrement_stock(id)?
            .ok_or_else(|| item_not_found(id))?;
        Ok(ItemDto::new(&item, &store.categories()))
    })
}

/// Manage tab: add `amount` units (negative removes). Fractions are floored.
pub fn adjust_stock(
    session: &SessionState,
    inventory: &InventoryState,
    id: &str,
    amount: f64,
) -> Result<ItemDto, ApiError> {
    require_user(session)?;
    if !amount.is_finite() {
        return Err(ApiError::validation("amount must be a finite number"));
    }
    if amount.abs() > MAX_STOCK as f64 {
        return Err(ValidationError::TooLarge {
            field: "amount".to_string(),
            max: MAX_STOCK,
        }
        .into());
    }
    let amount = amount.floor() as i64;
    debug!(id = %id, amount, "adjust_stock command");

    inventory.with_store_mut(|store| {
        let item = store
            .adjust_stock(id, amount)?
            .ok_or_else(|| item_not_found(id))?;
        Ok(ItemDto::new(&item, &store.categories()))
    })
}

/// Settings tab: save all three levels; they are clamped into range first.
pub fn save_levels(
    session: &SessionState,
    inventory: &InventoryState,
    id: &str,
    levels: StockLevels,
) -> Result<ItemDto, ApiError> {
    require_user(session)?;
    debug!(id = %id, ?levels, "save_levels command");
    for (field, value) in [
        ("currentStock", levels.current_stock),
        ("idealStock", levels.ideal_stock),
        ("threshold", levels.threshold),
    ] {
        if value > MAX_STOCK {
            return Err(ValidationError::TooLarge {
                field: field.to_string(),
                max: MAX_STOCK,
            }
            .into());
        }
    }

    inventory.with_store_mut(|store| {
        let item = store
            .save_levels(id, levels)?
            .ok_or_else(|| item_not_found(id))?;
        Ok(ItemDto::new(&item, &store.categories()))
    })
}

/// Settings-tab stepper: moves one level by one and saves.
///
/// A step the stepper would refuse (below zero, threshold past ideal) is a
/// validation error and nothing is written.
pub fn step_level(
    session: &SessionState,
    inventory: &InventoryState,
    id: &str,
    field: LevelField,
    up: bool,
) -> Result<ItemDto, ApiError> {
    require_user(session)?;
    debug!(id = %id, ?field, up, "step_level command");

    inventory.with_store_mut(|store| {
        let item = store.item(id).ok_or_else(|| item_not_found(id))?;
        let mut levels = item.levels();
        let moved = if up {
            levels.increment(field)
        } else {
            levels.decrement(field)
        };
        if !moved {
            return Err(ApiError::validation(format!("{:?} cannot move further", field)));
        }
        let item = store
            .save_levels(id, levels)?
            .ok_or_else(|| item_not_found(id))?;
        Ok(ItemDto::new(&item, &store.categories()))
    })
}
