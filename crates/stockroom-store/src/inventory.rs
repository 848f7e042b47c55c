//! # Inventory State Store
//!
//! Holds the three collections (items, categories, history) in memory,
//! publishes every change to subscribers, and writes the whole dataset
//! through to local storage on each mutation.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item / update_item / add_category / stock helpers                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Build the next items / categories / history vectors                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Persist all three keys ──── Err ──► return Err, nothing published  │
//! │       │ Ok                                                              │
//! │       ▼                                                                 │
//! │  3. send_replace on each watch channel that changed                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Subscribers see the new snapshot (latest value only)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## History Rules
//! - `add_item` appends one `create` entry carrying the new item.
//! - `update_item` with a changed `currentStock` appends `add` or `remove`
//!   with the absolute delta; any other non-empty update appends `update`
//!   with before/after snapshots.
//! - Categories never produce history.
//!
//! The store does not validate. Callers normalise input first (see
//! `stockroom_core::validation`).

use chrono::Utc;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use stockroom_core::stock::{adjusted_stock, can_decrement, can_increment};
use stockroom_core::{
    Category, HistoryAction, HistoryEntry, HistoryValue, IdGenerator, InventoryItem,
    InventoryStats, ItemUpdate, NewCategory, NewItem, StockLevels, DEFAULT_ACTOR,
};

use crate::error::{StoreError, StoreResult};
use crate::storage::{keys, read_json, write_json, LocalStorage};

/// Items, categories and history with change notification.
///
/// ## Usage
/// ```rust
/// use stockroom_core::NewItem;
/// use stockroom_store::{InventoryStore, MemoryStorage};
///
/// let mut store = InventoryStore::load(MemoryStorage::new()).unwrap();
/// store.add_item(NewItem {
///     name: Some("Cable ties".to_string()),
///     current_stock: Some(3),
///     ideal_stock: Some(20),
///     threshold: Some(5),
///     ..Default::default()
/// }).unwrap();
///
/// assert_eq!(store.total_items(), 1);
/// assert_eq!(store.low_stock_count(), 1);
/// ```
#[derive(Debug)]
pub struct InventoryStore<S: LocalStorage> {
    storage: S,
    items: watch::Sender<Vec<InventoryItem>>,
    categories: watch::Sender<Vec<Category>>,
    history: watch::Sender<Vec<HistoryEntry>>,
    ids: IdGenerator,
    actor: String,
}

/// Which collections a mutation touched.
struct Changes {
    items: Option<Vec<InventoryItem>>,
    categories: Option<Vec<Category>>,
    history: Option<Vec<HistoryEntry>>,
}

fn load_collection<T: DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: &str,
) -> StoreResult<Vec<T>> {
    match read_json::<Vec<T>>(storage, key) {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(StoreError::Corrupt { reason, .. }) => {
            warn!(key = %key, reason = %reason, "Stored collection is unreadable, starting empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

impl<S: LocalStorage> InventoryStore<S> {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads the dataset from `storage`.
    ///
    /// Missing keys give empty collections, and so do blobs that fail to
    /// parse. Only a failing backend is an error.
    pub fn load(storage: S) -> StoreResult<Self> {
        let items: Vec<InventoryItem> = load_collection(&storage, keys::ITEMS)?;
        let categories: Vec<Category> = load_collection(&storage, keys::CATEGORIES)?;
        let history: Vec<HistoryEntry> = load_collection(&storage, keys::HISTORY)?;

        let mut ids = IdGenerator::new();
        items.iter().for_each(|i| ids.observe(&i.id));
        categories.iter().for_each(|c| ids.observe(&c.id));
        history.iter().for_each(|h| ids.observe(&h.id));

        info!(
            items = items.len(),
            categories = categories.len(),
            history = history.len(),
            "Loaded inventory"
        );

        Ok(InventoryStore {
            storage,
            items: watch::channel(items).0,
            categories: watch::channel(categories).0,
            history: watch::channel(history).0,
            ids,
            actor: DEFAULT_ACTOR.to_string(),
        })
    }

    /// The storage this store writes to.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Sets the `user` label written into new history entries.
    pub fn set_actor(&mut self, actor: impl Into<String>) {
        self.actor = actor.into();
        debug!(actor = %self.actor, "History actor changed");
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    // =========================================================================
    // Snapshots and Subscriptions
    // =========================================================================

    pub fn items(&self) -> Vec<InventoryItem> {
        self.items.borrow().clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.borrow().clone()
    }

    /// Receiver that holds the current items and is woken on every change.
    pub fn subscribe_items(&self) -> watch::Receiver<Vec<InventoryItem>> {
        self.items.subscribe()
    }

    pub fn subscribe_categories(&self) -> watch::Receiver<Vec<Category>> {
        self.categories.subscribe()
    }

    pub fn subscribe_history(&self) -> watch::Receiver<Vec<HistoryEntry>> {
        self.history.subscribe()
    }

    // =========================================================================
    // Lookups and Counts
    // =========================================================================

    pub fn item(&self, id: &str) -> Option<InventoryItem> {
        self.items.borrow().iter().find(|i| i.id == id).cloned()
    }

    pub fn category(&self, id: &str) -> Option<Category> {
        self.categories.borrow().iter().find(|c| c.id == id).cloned()
    }

    /// Name of the category, or `""` when it does not exist.
    pub fn category_name(&self, id: &str) -> String {
        self.category(id).map(|c| c.name).unwrap_or_default()
    }

    pub fn item_count_for_category(&self, id: &str) -> usize {
        stockroom_core::query::item_count_for_category(&self.items.borrow(), id)
    }

    pub fn total_items(&self) -> usize {
        self.items.borrow().len()
    }

    /// Items at or below their threshold.
    pub fn low_stock_count(&self) -> usize {
        self.items.borrow().iter().filter(|i| i.is_low_stock()).count()
    }

    pub fn category_count(&self) -> usize {
        self.categories.borrow().len()
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats::compute(&self.items.borrow(), &self.categories.borrow())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds an item and its `create` history entry.
    pub fn add_item(&mut self, new: NewItem) -> StoreResult<InventoryItem> {
        let now = Utc::now();
        let item = new.into_item(self.ids.next_id(now));

        let mut items = self.items();
        items.push(item.clone());

        let entry = self.entry(
            &item,
            HistoryAction::Create,
            None,
            None,
            Some(HistoryValue::Item(item.clone())),
        );
        let mut history = self.history();
        history.push(entry);

        self.commit(Changes {
            items: Some(items),
            categories: None,
            history: Some(history),
        })?;

        debug!(id = %item.id, name = %item.name, category = %item.category, "Added item");
        Ok(item)
    }

    /// Merges `updates` into the item with `id`.
    ///
    /// Returns `Ok(None)` when no such item exists; nothing is written then.
    pub fn update_item(
        &mut self,
        id: &str,
        updates: ItemUpdate,
    ) -> StoreResult<Option<InventoryItem>> {
        let mut items = self.items();
        let Some(index) = items.iter().position(|i| i.id == id) else {
            debug!(id = %id, "Update for unknown item ignored");
            return Ok(None);
        };

        let old = items[index].clone();
        let updated = old.merged(&updates);
        items[index] = updated.clone();

        let entry = match updates.current_stock {
            Some(stock) if stock != old.current_stock => {
                let action = if stock > old.current_stock {
                    HistoryAction::Add
                } else {
                    HistoryAction::Remove
                };
                Some(self.entry(
                    &old,
                    action,
                    Some((stock - old.current_stock).abs()),
                    Some(HistoryValue::Stock(old.current_stock)),
                    Some(HistoryValue::Stock(stock)),
                ))
            }
            _ if !updates.is_empty() => Some(self.entry(
                &old,
                HistoryAction::Update,
                None,
                Some(HistoryValue::Item(old.clone())),
                Some(HistoryValue::Item(updated.clone())),
            )),
            _ => None,
        };

        let action = entry.as_ref().map(|e| e.action);
        let history = entry.map(|e| {
            let mut history = self.history();
            history.push(e);
            history
        });

        self.commit(Changes {
            items: Some(items),
            categories: None,
            history,
        })?;

        debug!(id = %id, action = ?action, "Updated item");
        Ok(Some(updated))
    }

    /// Adds a category. Categories have no history.
    pub fn add_category(&mut self, new: NewCategory) -> StoreResult<Category> {
        let category = Category {
            id: self.ids.next_id(Utc::now()),
            name: new.name.unwrap_or_default(),
        };

        let mut categories = self.categories();
        categories.push(category.clone());

        self.commit(Changes {
            items: None,
            categories: Some(categories),
            history: None,
        })?;

        debug!(id = %category.id, name = %category.name, "Added category");
        Ok(category)
    }

    // =========================================================================
    // Stock Helpers
    // =========================================================================

    /// Adds one unit while the item is below its ideal level.
    ///
    /// At the ideal level the item is returned unchanged.
    pub fn increment_stock(&mut self, id: &str) -> StoreResult<Option<InventoryItem>> {
        let Some(item) = self.item(id) else {
            return Ok(None);
        };
        if !can_increment(item.current_stock, item.ideal_stock) {
            return Ok(Some(item));
        }
        self.update_item(id, ItemUpdate::stock(item.current_stock + 1))
    }

    /// Removes one unit while the item has any. At zero nothing changes.
    pub fn decrement_stock(&mut self, id: &str) -> StoreResult<Option<InventoryItem>> {
        let Some(item) = self.item(id) else {
            return Ok(None);
        };
        if !can_decrement(item.current_stock) {
            return Ok(Some(item));
        }
        self.update_item(id, ItemUpdate::stock(item.current_stock - 1))
    }

    /// Adds `amount` (negative to remove), flooring the result at zero.
    ///
    /// When that leaves the stock where it was, nothing is written.
    pub fn adjust_stock(&mut self, id: &str, amount: i64) -> StoreResult<Option<InventoryItem>> {
        let Some(item) = self.item(id) else {
            return Ok(None);
        };
        let stock = adjusted_stock(item.current_stock, amount);
        if stock == item.current_stock {
            return Ok(Some(item));
        }
        self.update_item(id, ItemUpdate::stock(stock))
    }

    /// Writes all three levels at once, after clamping them into range.
    pub fn save_levels(
        &mut self,
        id: &str,
        levels: StockLevels,
    ) -> StoreResult<Option<InventoryItem>> {
        self.update_item(id, ItemUpdate::levels(levels.sanitized()))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn entry(
        &mut self,
        item: &InventoryItem,
        action: HistoryAction,
        quantity: Option<i64>,
        previous_value: Option<HistoryValue>,
        new_value: Option<HistoryValue>,
    ) -> HistoryEntry {
        let now = Utc::now();
        HistoryEntry {
            id: self.ids.next_id(now),
            date: now,
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            action,
            quantity,
            previous_value,
            new_value,
            user: self.actor.clone(),
        }
    }

    /// Persists the full dataset with `changes` applied, then publishes.
    fn commit(&self, changes: Changes) -> StoreResult<()> {
        {
            let current_items = self.items.borrow();
            let current_categories = self.categories.borrow();
            let current_history = self.history.borrow();

            self.persist(
                changes.items.as_ref().unwrap_or(&*current_items),
                changes.categories.as_ref().unwrap_or(&*current_categories),
                changes.history.as_ref().unwrap_or(&*current_history),
            )?;
        }

        if let Some(items) = changes.items {
            self.items.send_replace(items);
        }
        if let Some(categories) = changes.categories {
            self.categories.send_replace(categories);
        }
        if let Some(history) = changes.history {
            self.history.send_replace(history);
        }
        Ok(())
    }

    /// Writes the three collections. If any write fails, the keys already
    /// written are put back to their previous blobs before the error returns.
    fn persist(
        &self,
        items: &[InventoryItem],
        categories: &[Category],
        history: &[HistoryEntry],
    ) -> StoreResult<()> {
        let previous = [
            (keys::ITEMS, self.storage.get_item(keys::ITEMS)?),
            (keys::CATEGORIES, self.storage.get_item(keys::CATEGORIES)?),
            (keys::HISTORY, self.storage.get_item(keys::HISTORY)?),
        ];

        let mut written = 0;
        let result = write_json(&self.storage, keys::ITEMS, items)
            .inspect(|_| written += 1)
            .and_then(|_| write_json(&self.storage, keys::CATEGORIES, categories))
            .inspect(|_| written += 1)
            .and_then(|_| write_json(&self.storage, keys::HISTORY, history));

        if let Err(e) = result {
            warn!(error = %e, written, "Persist failed, restoring earlier blobs");
            for (key, blob) in &previous[..written] {
                let restored = match blob {
                    Some(raw) => self.storage.set_item(key, raw),
                    None => self.storage.remove_item(key),
                };
                if let Err(restore_err) = restored {
                    warn!(key = %key, error = %restore_err, "Could not restore blob");
                }
            }
            return Err(e);
        }

        debug!(
            items = items.len(),
            categories = categories.len(),
            history = history.len(),
            "Persisted inventory"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
