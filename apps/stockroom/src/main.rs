//! # Stockroom Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs ──► stockroom_lib::run()                                       │
//! │                 │                                                       │
//! │                 ├── config (stockroom.toml, STOCKROOM_* env)            │
//! │                 ├── FileStorage (<data_dir>/<key>.json)                 │
//! │                 ├── InventoryState / SessionState / PreferencesState    │
//! │                 └── Shell on stdin/stdout                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `stockroom [--config <path>]`

fn main() -> anyhow::Result<()> {
    // setup lives in lib.rs so it can be tested
    stockroom_lib::run()
}
