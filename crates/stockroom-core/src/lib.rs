//! # stockroom-core: Pure Domain Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It contains the inventory
//! domain as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Shell / Frontend (presentation)                 │   │
//! │  │   Dashboard ──► Inventory tabs ──► History ──► Export          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    App Commands                                 │   │
//! │  │    login, add_item, adjust_stock, export_history, etc.          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockroom-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  stock  │ │  query  │ │  i18n   │ │ export  │  │   │
//! │  │   │  Item   │ │ levels  │ │ search  │ │ he / en │ │ CSV     │  │   │
//! │  │   │ History │ │ rules   │ │ paging  │ │ rtl/ltr │ │ Sheet   │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockroom-store (Storage Layer)                  │   │
//! │  │        key/value storage, inventory state store, session        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, Category, HistoryEntry, etc.)
//! - [`id`] - Timestamp-derived identifier generation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and normalisation
//! - [`stock`] - Stock level rules used by the inventory tabs
//! - [`query`] - Search, grouping and pagination over snapshots
//! - [`auth`] - Roles, demo credentials and route guards
//! - [`i18n`] - Hebrew/English dictionaries and text direction
//! - [`export`] - CSV and spreadsheet rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{InventoryItem, ItemStatus};
//!
//! let item = InventoryItem {
//!     id: "1700000000000".to_string(),
//!     name: "Cable ties".to_string(),
//!     category: "1699999999999".to_string(),
//!     current_stock: 3,
//!     ideal_stock: 20,
//!     threshold: 5,
//! };
//!
//! assert_eq!(item.status(), ItemStatus::Low);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod export;
pub mod i18n;
pub mod id;
pub mod query;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use auth::{Role, Route, User};
pub use error::{CoreError, CoreResult, ValidationError};
pub use i18n::{Language, TextDirection, Translator};
pub use id::IdGenerator;
pub use stock::{LevelField, StockLevels};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// History `user` label used until a signed-in user is attached to the store.
pub const DEFAULT_ACTOR: &str = "Current User";

/// Maximum length of an item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Maximum length of a search term.
pub const MAX_SEARCH_LEN: usize = 100;

/// Largest stock level accepted from input.
pub const MAX_STOCK: i64 = 1_000_000_000;

/// Rows per page in the history view.
pub const DEFAULT_HISTORY_PAGE_SIZE: usize = 10;
