//! # Queries over Snapshots
//!
//! Read-only helpers the views run against store snapshots: search, grouping
//! by category, history ordering and pagination. Everything here borrows the
//! snapshot and allocates only the result.

use serde::Serialize;

use crate::types::{Category, HistoryEntry, InventoryItem};

// =============================================================================
// Search
// =============================================================================

/// Name of the category with `id`, or `""` when there is none.
pub fn category_name<'a>(categories: &'a [Category], id: &str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or("")
}

/// Items whose name or category name contains `term`, ignoring case.
///
/// An empty term matches everything.
pub fn filter_items<'a>(
    items: &'a [InventoryItem],
    categories: &[Category],
    term: &str,
) -> Vec<&'a InventoryItem> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&term)
                || category_name(categories, &item.category)
                    .to_lowercase()
                    .contains(&term)
        })
        .collect()
}

/// A category together with the items listed under it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    pub items: Vec<&'a InventoryItem>,
}

/// Groups `items` under their categories, in category order.
///
/// Every category gets a group, even an empty one. Items pointing at an
/// unknown category are left out.
pub fn group_by_category<'a>(
    categories: &'a [Category],
    items: &[&'a InventoryItem],
) -> Vec<CategoryGroup<'a>> {
    categories
        .iter()
        .map(|category| CategoryGroup {
            category,
            items: items
                .iter()
                .copied()
                .filter(|item| item.category == category.id)
                .collect(),
        })
        .collect()
}

/// Number of items filed under the category with `id`.
pub fn item_count_for_category(items: &[InventoryItem], id: &str) -> usize {
    items.iter().filter(|item| item.category == id).count()
}

// =============================================================================
// History
// =============================================================================

/// History ordered newest first. Entries with equal dates keep their order.
pub fn history_newest_first(history: &[HistoryEntry]) -> Vec<&HistoryEntry> {
    let mut sorted: Vec<&HistoryEntry> = history.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

// =============================================================================
// Pagination
// =============================================================================

/// One-based bounds shown in a paginator label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
    pub length: usize,
}

/// Bounds for the label of page `page` (zero-based).
///
/// Returns `None` when there is nothing to show. Past the last page the end
/// is not clamped to the length, the same as the paginator does.
pub fn page_range(page: usize, page_size: usize, length: usize) -> Option<PageRange> {
    if length == 0 || page_size == 0 {
        return None;
    }

    let start = page.saturating_mul(page_size);
    let end = if start < length {
        start.saturating_add(page_size).min(length)
    } else {
        start.saturating_add(page_size)
    };

    Some(PageRange {
        start: start.saturating_add(1),
        end,
        length,
    })
}

/// The rows of page `page` (zero-based). Out-of-range pages are empty.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed for `length` rows.
pub fn page_count(length: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    length.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistoryAction;
    use chrono::{TimeZone, Utc};

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "c1".to_string(),
                name: "Safety".to_string(),
            },
            Category {
                id: "c2".to_string(),
                name: "Electrical".to_string(),
            },
        ]
    }

    fn item(id: &str, name: &str, category: &str) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            current_stock: 1,
            ideal_stock: 5,
            threshold: 1,
        }
    }

    fn entry(id: &str, millis: i64) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            date: Utc.timestamp_millis_opt(millis).unwrap(),
            item_id: "1".to_string(),
            item_name: "Gloves".to_string(),
            action: HistoryAction::Add,
            quantity: Some(1),
            previous_value: None,
            new_value: None,
            user: "Current User".to_string(),
        }
    }

    #[test]
    fn test_filter_by_name_or_category() {
        let cats = categories();
        let items = vec![
            item("1", "Nitrile Gloves", "c1"),
            item("2", "Cable ties", "c2"),
            item("3", "Fuse", "c2"),
        ];

        assert_eq!(filter_items(&items, &cats, "").len(), 3);
        assert_eq!(filter_items(&items, &cats, "GLOVES").len(), 1);

        let electrical: Vec<&str> = filter_items(&items, &cats, "electr")
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(electrical, vec!["2", "3"]);
    }

    #[test]
    fn test_unknown_category_name_is_empty() {
        assert_eq!(category_name(&categories(), "missing"), "");
        assert_eq!(category_name(&categories(), "c2"), "Electrical");
    }

    #[test]
    fn test_group_in_category_order() {
        let cats = categories();
        let items = vec![
            item("1", "Fuse", "c2"),
            item("2", "Helmet", "c1"),
            item("3", "Orphan", "gone"),
        ];
        let refs: Vec<&InventoryItem> = items.iter().collect();
        let groups = group_by_category(&cats, &refs);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category.name, "Safety");
        assert_eq!(groups[0].items[0].name, "Helmet");
        assert_eq!(groups[1].items[0].name, "Fuse");
        assert_eq!(item_count_for_category(&items, "c2"), 1);
    }

    #[test]
    fn test_history_newest_first() {
        let history = vec![entry("a", 1_000), entry("b", 3_000), entry("c", 2_000)];
        let ids: Vec<&str> = history_newest_first(&history)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_page_range() {
        assert_eq!(page_range(0, 10, 0), None);
        assert_eq!(page_range(0, 0, 5), None);
        assert_eq!(
            page_range(1, 10, 25),
            Some(PageRange {
                start: 11,
                end: 20,
                length: 25
            })
        );
        assert_eq!(page_range(2, 10, 25).unwrap().end, 25);
        // past the end the bound is not clamped
        assert_eq!(page_range(5, 10, 25).unwrap().end, 60);
    }

    #[test]
    fn test_page_range_saturates_on_huge_page() {
        let range = page_range(usize::MAX - 1, 10, 3).unwrap();
        assert_eq!(range.start, usize::MAX);
        assert_eq!(range.end, usize::MAX);
        assert!(paginate(&[1, 2, 3], usize::MAX - 1, 10).is_empty());

        let range = page_range(0, usize::MAX, 3).unwrap();
        assert_eq!((range.start, range.end), (1, 3));
        assert_eq!(paginate(&[1, 2, 3], 0, usize::MAX), &[1, 2, 3]);
    }

    #[test]
    fn test_paginate() {
        let rows: Vec<u32> = (0..25).collect();
        assert_eq!(paginate(&rows, 0, 10).len(), 10);
        assert_eq!(paginate(&rows, 2, 10), &[20, 21, 22, 23, 24]);
        assert!(paginate(&rows, 3, 10).is_empty());
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(0, 10), 0);
    }
}
