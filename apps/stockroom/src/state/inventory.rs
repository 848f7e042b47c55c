//! # Inventory State
//!
//! The inventory store behind a `Mutex`, so any command on any thread can
//! reach it. Reads take the lock briefly and copy out what they need.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub fn get_stats(inventory: &InventoryState) -> InventoryStats {
//!     inventory.with_store(|store| store.stats())
//! }
//! ```

use std::sync::Mutex;

use stockroom_store::{InventoryStore, StoreResult};

use super::SharedStorage;

/// Shared inventory store.
pub struct InventoryState {
    store: Mutex<InventoryStore<SharedStorage>>,
}

impl InventoryState {
    /// Loads the inventory from `storage`.
    pub fn load(storage: SharedStorage) -> StoreResult<Self> {
        Ok(InventoryState {
            store: Mutex::new(InventoryStore::load(storage)?),
        })
    }

    /// Executes a function with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InventoryStore<SharedStorage>) -> R,
    {
        let store = self.store.lock().expect("Inventory mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InventoryStore<SharedStorage>) -> R,
    {
        let mut store = self.store.lock().expect("Inventory mutex poisoned");
        f(&mut store)
    }
}
