//! # stockroom-store: Storage Layer for Stockroom
//!
//! Keeps the inventory in memory, mirrors it to local storage, and tells
//! subscribers when it changes. Also persists the session and preferences.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  App command (adjust_stock)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 stockroom-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ InventoryStore│    │    Session    │    │ Preferences  │  │   │
//! │  │   │ items         │    │ currentUser   │    │ darkMode     │  │   │
//! │  │   │ categories    │    │               │    │ language     │  │   │
//! │  │   │ history       │    │               │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────┬───────┘  │   │
//! │  │           └────────────────────┼───────────────────┘          │   │
//! │  │                                ▼                               │   │
//! │  │                    LocalStorage (storage.rs)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data_dir>/inventoryItems.json, inventoryHistory.json, ...            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - Key/value storage trait and its memory/file backends
//! - [`inventory`] - The inventory state store
//! - [`session`] - Signed-in user
//! - [`preferences`] - Dark mode and language
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use stockroom_core::NewCategory;
//! use stockroom_store::{InventoryStore, MemoryStorage};
//!
//! let mut store = InventoryStore::load(MemoryStorage::new())?;
//! let safety = store.add_category(NewCategory::named("Safety"))?;
//! assert_eq!(store.category_name(&safety.id), "Safety");
//! # Ok::<(), stockroom_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod preferences;
pub mod session;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use inventory::InventoryStore;
pub use preferences::Preferences;
pub use session::Session;
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
