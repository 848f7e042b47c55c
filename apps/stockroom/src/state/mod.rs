//! # State Module
//!
//! Application state, split into focused types instead of one `AppState`.
//! Each command takes only the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │                     SharedStorage (Arc<dyn LocalStorage>)               │
//! │          ┌──────────────────┼──────────────────┐                        │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐  ┌─────────┐ │
//! │  │InventoryState│  │ SessionState │  │ PreferencesState │  │AppConfig│ │
//! │  │              │  │              │  │                  │  │         │ │
//! │  │ Mutex<       │  │ Mutex<       │  │ Mutex<           │  │ dirs    │ │
//! │  │  Inventory-  │  │  Session>    │  │  Preferences>    │  │ page    │ │
//! │  │  Store>      │  │              │  │                  │  │ size    │ │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘  └─────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Each store sits behind its own Mutex                                │
//! │  • AppConfig is read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod inventory;
mod session;

use std::sync::Arc;

use stockroom_store::LocalStorage;

pub use config::{AppConfig, ConfigError, ConfigResult};
pub use inventory::InventoryState;
pub use session::{PreferencesState, SessionState};

/// Storage handle shared by all state types.
pub type SharedStorage = Arc<dyn LocalStorage>;
