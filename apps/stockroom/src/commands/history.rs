//! History view: newest first, paginated, with the labels already translated.

use serde::Serialize;

use stockroom_core::export::format_date;
use stockroom_core::query::{history_newest_first, page_count, paginate};

use crate::commands::auth::require_user;
use crate::error::ApiError;
use crate::state::{InventoryState, PreferencesState, SessionState};

/// One history row as displayed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub id: String,
    pub date: String,
    pub item_name: String,
    pub action: String,
    /// `-` when there is no quantity or it is zero.
    pub quantity: String,
    pub user: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub rows: Vec<HistoryRow>,
    /// Zero-based.
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub range_label: String,
}

/// Page `page` (zero-based) of the history, `page_size` rows per page.
pub fn history_page(
    session: &SessionState,
    inventory: &InventoryState,
    prefs: &PreferencesState,
    page: usize,
    page_size: usize,
) -> Result<HistoryPage, ApiError> {
    require_user(session)?;
    if page_size == 0 {
        return Err(ApiError::validation("page size must be greater than 0"));
    }

    let translator = prefs.with_prefs(|p| p.translator());
    let history = inventory.with_store(|s| s.history());
    let ordered = history_newest_first(&history);

    let rows = paginate(&ordered, page, page_size)
        .iter()
        .map(|entry| HistoryRow {
            id: entry.id.clone(),
            date: format_date(entry.date, translator.language()),
            item_name: entry.item_name.clone(),
            action: translator.t(&entry.action.translation_key()).to_string(),
            quantity: match entry.quantity {
                Some(q) if q != 0 => q.to_string(),
                _ => "-".to_string(),
            },
            user: entry.user.clone(),
        })
        .collect();

    Ok(HistoryPage {
        rows,
        page,
        page_count: page_count(ordered.len(), page_size),
        total: ordered.len(),
        range_label: translator.range_label(page, page_size, ordered.len()),
    })
}
