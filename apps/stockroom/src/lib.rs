//! # Stockroom App Library
//!
//! Wires storage, state and commands together and runs the line shell.
//!
//! ## Module Organization
//! ```text
//! stockroom_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports, SharedStorage
//! │   ├── config.rs   ◄─── TOML + env configuration
//! │   ├── inventory.rs◄─── Inventory store wrapper
//! │   └── session.rs  ◄─── Session and preferences wrappers
//! ├── commands/
//! │   ├── auth.rs     ◄─── login/logout, route guards
//! │   ├── inventory.rs◄─── stats, search, stock changes
//! │   ├── category.rs ◄─── category list/add
//! │   ├── history.rs  ◄─── paginated history
//! │   ├── export.rs   ◄─── CSV / spreadsheet files
//! │   └── preferences.rs ◄ dark mode, language
//! ├── shell.rs        ◄─── stdin/stdout front end
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! All three states share one storage handle, so the inventory, the session
//! and the preferences write to the same data directory.

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shell::Shell;
use state::{AppConfig, InventoryState, PreferencesState, SessionState, SharedStorage};
use stockroom_store::FileStorage;

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (stderr; stdout belongs to the shell)           │
/// │  2. Load config: defaults → stockroom.toml → STOCKROOM_* env           │
/// │  3. Open the data directory as local storage                           │
/// │  4. Load inventory, session and preferences from storage               │
/// │  5. Restore the signed-in user as the history actor                    │
/// │  6. Run the shell on stdin/stdout                                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> anyhow::Result<()> {
    init_tracing();
    info!("Starting Stockroom");

    let config = AppConfig::load_or_default(config_path_from_args(std::env::args().skip(1)));
    info!(data_dir = %config.data_dir.display(), "Configuration loaded");

    let storage: SharedStorage = Arc::new(
        FileStorage::open(&config.data_dir)
            .with_context(|| format!("opening {}", config.data_dir.display()))?,
    );

    let locale = config
        .language
        .map(|l| l.code().to_string())
        .or_else(|| std::env::var("LANG").ok());

    let inventory = InventoryState::load(storage.clone()).context("loading inventory")?;
    let session = SessionState::load(storage.clone()).context("loading session")?;
    let prefs = PreferencesState::load(storage, locale.as_deref()).context("loading preferences")?;

    if let Some(user) = session.current_user() {
        info!(email = %user.email, "Restored session");
        inventory.with_store_mut(|store| store.set_actor(user.email));
    }

    let shell = Shell {
        inventory: &inventory,
        session: &session,
        prefs: &prefs,
        config: &config,
    };
    shell.run(std::io::stdin().lock(), std::io::stdout().lock())?;

    info!("Bye");
    Ok(())
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn,stockroom=info,stockroom_store=info";

/// Initializes the tracing subscriber.
///
/// Default filter is [`DEFAULT_LOG_FILTER`]
/// (`warn,stockroom=info,stockroom_store=info`); override with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--config <path>` / `-c <path>` from the command line, if given.
fn config_path_from_args(args: impl Iterator<Item = String>) -> Option<PathBuf> {
    let mut args = args;
    while let Some(arg) = args.next() {
        if arg == "--config" || arg == "-c" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_config_flag() {
        assert_eq!(
            config_path_from_args(args(&["--config", "/tmp/s.toml"])),
            Some(PathBuf::from("/tmp/s.toml"))
        );
        assert_eq!(config_path_from_args(args(&["-c"])), None);
        assert_eq!(config_path_from_args(args(&[])), None);
    }

    #[test]
    fn test_default_log_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        let shown = filter.to_string();
        assert!(shown.contains("stockroom=info"));
        assert!(shown.contains("stockroom_store=info"));
    }
}
