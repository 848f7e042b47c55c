//! # Export Rendering
//!
//! Builds translated tables from snapshots and renders them as CSV or as an
//! `.xlsx` workbook. Rendering happens in memory; writing the bytes to disk
//! is the caller's job.
//!
//! ```text
//! ┌──────────────┐   history_table    ┌────────────┐   render_csv          ┌────────┐
//! │  snapshots   │ ─────────────────► │ ExportTable│ ────────────────────► │ bytes  │
//! │  + language  │   inventory_table  │ headers    │   render_spreadsheet  │        │
//! └──────────────┘                    │ rows       │                       └────────┘
//!                                     └────────────┘
//! ```
//!
//! An empty table renders to nothing (`None`), so no empty file is produced.

use chrono::{DateTime, NaiveDate, Utc};
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::i18n::{Language, Translator};
use crate::query::{category_name, history_newest_first};
use crate::types::{Category, HistoryEntry, InventoryItem};

/// UTF-8 byte order mark written at the start of every CSV file.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Name of the only worksheet in a spreadsheet export.
pub const SHEET_NAME: &str = "Sheet1";

/// Narrowest spreadsheet column, in characters.
pub const MIN_COLUMN_WIDTH: usize = 15;

/// File name stem for history exports.
pub const HISTORY_EXPORT_BASE: &str = "inventory_history";

/// File name stem for current-inventory exports.
pub const INVENTORY_EXPORT_BASE: &str = "current_inventory";

// =============================================================================
// Formats and Tables
// =============================================================================

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Spreadsheet,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Spreadsheet => "xlsx",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" | "spreadsheet" => Ok(ExportFormat::Spreadsheet),
            other => Err(format!(
                "Unknown export format '{}'. Valid options: csv, excel",
                other
            )),
        }
    }
}

/// A single exported value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(i64),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Header row plus data rows, ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ExportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Table Builders
// =============================================================================

/// Formats an export timestamp the way each locale shows local date-times.
pub fn format_date(date: DateTime<Utc>, language: Language) -> String {
    match language {
        Language::He => date.format("%-d.%-m.%Y, %H:%M:%S").to_string(),
        Language::En => date.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
    }
}

/// History rows, newest first.
///
/// A missing or zero quantity is shown as `-`.
pub fn history_table(history: &[HistoryEntry], translator: &Translator) -> ExportTable {
    let headers = [
        "inventory.history.date",
        "inventory.history.item",
        "inventory.history.action",
        "inventory.history.quantity",
        "inventory.history.user",
    ]
    .iter()
    .map(|key| translator.t(key).to_string())
    .collect();

    let rows = history_newest_first(history)
        .into_iter()
        .map(|entry| {
            let quantity = match entry.quantity {
                Some(q) if q != 0 => Cell::Number(q),
                _ => Cell::text("-"),
            };
            vec![
                Cell::Text(format_date(entry.date, translator.language())),
                Cell::text(entry.item_name.as_str()),
                Cell::text(translator.t(&entry.action.translation_key())),
                quantity,
                Cell::text(entry.user.as_str()),
            ]
        })
        .collect();

    ExportTable { headers, rows }
}

/// Current inventory rows in store order.
///
/// The category column shows the category name, or the raw id when the
/// category no longer exists.
pub fn inventory_table(
    items: &[InventoryItem],
    categories: &[Category],
    translator: &Translator,
) -> ExportTable {
    let headers = [
        "inventory.items.name",
        "inventory.items.category",
        "inventory.items.currentStock",
        "inventory.items.idealStock",
        "inventory.items.threshold",
    ]
    .iter()
    .map(|key| translator.t(key).to_string())
    .collect();

    let rows = items
        .iter()
        .map(|item| {
            let category = match category_name(categories, &item.category) {
                "" => item.category.as_str(),
                name => name,
            };
            vec![
                Cell::text(item.name.as_str()),
                Cell::text(category),
                Cell::Number(item.current_stock),
                Cell::Number(item.ideal_stock),
                Cell::Number(item.threshold),
            ]
        })
        .collect();

    ExportTable { headers, rows }
}

// =============================================================================
// CSV
// =============================================================================

fn csv_cell(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => n.to_string(),
        Cell::Text(s) => {
            let needs_quotes = s.contains(',') || s.contains('"') || !s.is_ascii();
            if needs_quotes {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.clone()
            }
        }
    }
}

/// Renders CSV: BOM, unquoted header row, then one line per row joined by
/// `\n` with no trailing newline.
pub fn render_csv(table: &ExportTable) -> Option<Vec<u8>> {
    if table.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(table.headers.join(","));
    for row in &table.rows {
        lines.push(row.iter().map(csv_cell).collect::<Vec<_>>().join(","));
    }

    let mut bytes = UTF8_BOM.to_vec();
    bytes.extend_from_slice(lines.join("\n").as_bytes());
    Some(bytes)
}

// =============================================================================
// Spreadsheet
// =============================================================================

/// Column widths in characters: twice the header length, at least 15.
pub fn column_widths(headers: &[String]) -> Vec<usize> {
    headers
        .iter()
        .map(|h| (h.chars().count() * 2).max(MIN_COLUMN_WIDTH))
        .collect()
}

/// Renders a single-sheet `.xlsx` workbook.
///
/// Headers go in the first row; numbers are written as numeric cells.
pub fn render_spreadsheet(table: &ExportTable) -> CoreResult<Option<Vec<u8>>> {
    if table.is_empty() {
        return Ok(None);
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, width) in column_widths(&table.headers).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }
    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header.as_str())?;
    }
    for (index, row) in table.rows.iter().enumerate() {
        let row_num = index as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => sheet.write_string(row_num, col as u16, s.as_str())?,
                Cell::Number(n) => sheet.write_number(row_num, col as u16, *n as f64)?,
            };
        }
    }

    Ok(Some(workbook.save_to_buffer()?))
}

/// Renders `table` in `format`.
pub fn render(table: &ExportTable, format: ExportFormat) -> CoreResult<Option<Vec<u8>>> {
    match format {
        ExportFormat::Csv => Ok(render_csv(table)),
        ExportFormat::Spreadsheet => render_spreadsheet(table),
    }
}

/// `<base>_<YYYY-MM-DD>.<ext>`
pub fn file_name(base: &str, format: ExportFormat, date: NaiveDate) -> String {
    format!("{}_{}.{}", base, date.format("%Y-%m-%d"), format.extension())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistoryAction;
    use chrono::TimeZone;

    fn entry(millis: i64, action: HistoryAction, quantity: Option<i64>) -> HistoryEntry {
        HistoryEntry {
            id: millis.to_string(),
            date: Utc.timestamp_millis_opt(millis).unwrap(),
            item_id: "1".to_string(),
            item_name: "Gloves, nitrile".to_string(),
            action,
            quantity,
            previous_value: None,
            new_value: None,
            user: "admin@example.com".to_string(),
        }
    }

    fn table() -> ExportTable {
        ExportTable {
            headers: vec!["Name".to_string(), "Qty".to_string()],
            rows: vec![
                vec![Cell::text("plain"), Cell::Number(3)],
                vec![Cell::text("say \"hi\""), Cell::Number(0)],
                vec![Cell::text("כפפות"), Cell::Number(-1)],
            ],
        }
    }

    #[test]
    fn test_csv_quoting_and_bom() {
        let bytes = render_csv(&table()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0], "Name,Qty");
        assert_eq!(lines[1], "plain,3");
        assert_eq!(lines[2], "\"say \"\"hi\"\"\",0");
        assert_eq!(lines[3], "\"כפפות\",-1");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        let empty = ExportTable {
            headers: vec!["Name".to_string()],
            rows: vec![],
        };
        assert!(render_csv(&empty).is_none());
        assert!(render_spreadsheet(&empty).unwrap().is_none());
        assert!(render(&empty, ExportFormat::Spreadsheet).unwrap().is_none());
    }

    #[test]
    fn test_history_table() {
        let history = vec![
            entry(1_000, HistoryAction::Create, None),
            entry(2_000, HistoryAction::Remove, Some(2)),
            entry(3_000, HistoryAction::Add, Some(0)),
        ];
        let table = history_table(&history, &Translator::new(Language::En));

        assert_eq!(table.headers, vec!["Date", "Item", "Action", "Quantity", "User"]);
        assert_eq!(table.rows[0][2], Cell::text("Added"));
        assert_eq!(table.rows[0][3], Cell::text("-"));
        assert_eq!(table.rows[1][3], Cell::Number(2));
        assert_eq!(table.rows[2][2], Cell::text("Created"));
        assert_eq!(table.rows[2][3], Cell::text("-"));
    }

    #[test]
    fn test_inventory_table_falls_back_to_category_id() {
        let categories = vec![Category {
            id: "c1".to_string(),
            name: "Safety".to_string(),
        }];
        let items = vec![
            InventoryItem {
                id: "1".to_string(),
                name: "Helmet".to_string(),
                category: "c1".to_string(),
                current_stock: 2,
                ideal_stock: 10,
                threshold: 3,
            },
            InventoryItem {
                id: "2".to_string(),
                name: "Fuse".to_string(),
                category: "gone".to_string(),
                current_stock: 8,
                ideal_stock: 10,
                threshold: 3,
            },
        ];
        let table = inventory_table(&items, &categories, &Translator::new(Language::He));

        assert_eq!(table.headers[0], "שם פריט");
        assert_eq!(table.rows[0][1], Cell::text("Safety"));
        assert_eq!(table.rows[1][1], Cell::text("gone"));
        assert_eq!(table.rows[1][2], Cell::Number(8));
    }

    #[test]
    fn test_column_widths() {
        let headers = vec!["Date".to_string(), "A very long header".to_string()];
        assert_eq!(column_widths(&headers), vec![15, 36]);
    }

    #[test]
    fn test_spreadsheet_is_xlsx_workbook() {
        let table = ExportTable {
            headers: vec!["Item".to_string(), "Qty".to_string()],
            rows: vec![
                vec![Cell::text("Nuts & <bolts>"), Cell::Number(4)],
                vec![Cell::text("ברגים"), Cell::Number(0)],
            ],
        };
        let bytes = render(&table, ExportFormat::Spreadsheet).unwrap().unwrap();
        // xlsx is a zip container
        assert!(bytes.starts_with(b"PK\x03\x04"));
        assert!(bytes.len() > 1_000);
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            file_name(HISTORY_EXPORT_BASE, ExportFormat::Csv, date),
            "inventory_history_2024-03-09.csv"
        );
        assert_eq!(
            file_name(INVENTORY_EXPORT_BASE, ExportFormat::Spreadsheet, date),
            "current_inventory_2024-03-09.xlsx"
        );
        assert_eq!("excel".parse::<ExportFormat>().unwrap().extension(), "xlsx");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(format_date(date, Language::He), "9.3.2024, 14:05:07");
        assert_eq!(format_date(date, Language::En), "3/9/2024, 2:05:07 PM");
    }
}
