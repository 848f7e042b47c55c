//! Category commands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use stockroom_core::validation::validate_category_name;
use stockroom_core::NewCategory;

use crate::commands::auth::require_user;
use crate::error::ApiError;
use crate::state::{InventoryState, SessionState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub item_count: usize,
}

/// All categories in insertion order, with how many items each holds.
pub fn list_categories(
    session: &SessionState,
    inventory: &InventoryState,
) -> Result<Vec<CategoryDto>, ApiError> {
    require_user(session)?;
    Ok(inventory.with_store(|store| {
        store
            .categories()
            .into_iter()
            .map(|c| CategoryDto {
                item_count: store.item_count_for_category(&c.id),
                id: c.id,
                name: c.name,
            })
            .collect()
    }))
}

/// Adds a category. The name is trimmed and must be 1-100 characters.
pub fn add_category(
    session: &SessionState,
    inventory: &InventoryState,
    name: &str,
) -> Result<CategoryDto, ApiError> {
    require_user(session)?;
    validate_category_name(name)?;
    debug!(name = %name, "add_category command");

    let category =
        inventory.with_store_mut(|store| store.add_category(NewCategory::named(name.trim())))?;
    Ok(CategoryDto {
        id: category.id,
        name: category.name,
        item_count: 0,
    })
}
