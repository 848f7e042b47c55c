//! # Export Commands
//!
//! Writes history or current inventory to `export_dir` as CSV or a
//! spreadsheet, with headers in the active language.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store snapshot ──► history_table / inventory_table (translated)       │
//! │                 ──► render(format)  ── None when empty ──► Ok(None)    │
//! │                     (csv text, or an xlsx workbook)                    │
//! │                 ──► <export_dir>/<base>_<YYYY-MM-DD>.<ext>             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::info;

use stockroom_core::export::{
    file_name, history_table, inventory_table, render, ExportFormat, ExportTable,
    HISTORY_EXPORT_BASE, INVENTORY_EXPORT_BASE,
};

use crate::commands::auth::require_user;
use crate::error::ApiError;
use crate::state::{AppConfig, InventoryState, PreferencesState, SessionState};

/// Exports the full history, newest first.
///
/// Returns the written path, or `None` when there is no history.
pub fn export_history(
    session: &SessionState,
    inventory: &InventoryState,
    prefs: &PreferencesState,
    config: &AppConfig,
    format: ExportFormat,
) -> Result<Option<PathBuf>, ApiError> {
    require_user(session)?;
    let translator = prefs.with_prefs(|p| p.translator());
    let table = inventory.with_store(|s| history_table(&s.history(), &translator));
    write_export(
        &config.export_dir,
        HISTORY_EXPORT_BASE,
        &table,
        format,
        Utc::now().date_naive(),
    )
}

/// Exports every item with its category and levels.
pub fn export_inventory(
    session: &SessionState,
    inventory: &InventoryState,
    prefs: &PreferencesState,
    config: &AppConfig,
    format: ExportFormat,
) -> Result<Option<PathBuf>, ApiError> {
    require_user(session)?;
    let translator = prefs.with_prefs(|p| p.translator());
    let table =
        inventory.with_store(|s| inventory_table(&s.items(), &s.categories(), &translator));
    write_export(
        &config.export_dir,
        INVENTORY_EXPORT_BASE,
        &table,
        format,
        Utc::now().date_naive(),
    )
}

fn write_export(
    dir: &Path,
    base: &str,
    table: &ExportTable,
    format: ExportFormat,
    date: NaiveDate,
) -> Result<Option<PathBuf>, ApiError> {
    let Some(bytes) = render(table, format)? else {
        info!(base = %base, "Nothing to export");
        return Ok(None);
    };

    let path = dir.join(file_name(base, format, date));
    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(&path, &bytes))
        .map_err(|e| {
            tracing::error!(path = %path.display(), "Export failed: {}", e);
            ApiError::internal(format!("Could not write {}", path.display()))
        })?;

    info!(path = %path.display(), rows = table.rows.len(), "Exported");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::signed_in_states;
    use stockroom_core::{Language, NewCategory, NewItem};
    use tempfile::TempDir;

    fn config(dir: &Path) -> AppConfig {
        AppConfig {
            export_dir: dir.join("out"),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let (inventory, session, prefs) = signed_in_states("tech@example.com", "tech123");

        let path = export_history(
            &session,
            &inventory,
            &prefs,
            &config(temp.path()),
            ExportFormat::Csv,
        )
        .unwrap();
        assert!(path.is_none());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_inventory_csv() {
        let temp = TempDir::new().unwrap();
        let (inventory, session, prefs) = signed_in_states("tech@example.com", "tech123");
        prefs
            .with_prefs_mut(|p| p.switch_language(Language::En))
            .unwrap();
        inventory
            .with_store_mut(|s| {
                let cat = s.add_category(NewCategory::named("Tools"))?;
                s.add_item(NewItem {
                    name: Some("Wrench".into()),
                    category: Some(cat.id),
                    current_stock: Some(3),
                    ideal_stock: Some(5),
                    threshold: Some(1),
                })
            })
            .unwrap();

        let path = export_inventory(
            &session,
            &inventory,
            &prefs,
            &config(temp.path()),
            ExportFormat::Csv,
        )
        .unwrap()
        .unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("current_inventory_"));
        assert!(name.ends_with(".csv"));

        let bytes = std::fs::read(&path).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(
            text,
            "Item Name,Category,Current Stock,Ideal Stock,Threshold\nWrench,Tools,3,5,1"
        );
    }

    #[test]
    fn test_history_spreadsheet() {
        let temp = TempDir::new().unwrap();
        let (inventory, session, prefs) = signed_in_states("tech@example.com", "tech123");
        inventory
            .with_store_mut(|s| {
                let cat = s.add_category(NewCategory::named("כלים"))?;
                s.add_item(NewItem {
                    name: Some("מברג".into()),
                    category: Some(cat.id),
                    ..Default::default()
                })
            })
            .unwrap();

        let path = export_history(
            &session,
            &inventory,
            &prefs,
            &config(temp.path()),
            ExportFormat::Spreadsheet,
        )
        .unwrap()
        .unwrap();

        assert_eq!(path.extension().unwrap(), "xlsx");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("inventory_history_"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_requires_login() {
        let temp = TempDir::new().unwrap();
        let (inventory, session, prefs) = crate::commands::test_states();
        assert!(export_inventory(
            &session,
            &inventory,
            &prefs,
            &config(temp.path()),
            ExportFormat::Csv
        )
        .is_err());
    }
}
