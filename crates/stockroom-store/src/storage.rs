//! # Local Storage
//!
//! A string-keyed store of string blobs, the same shape as a browser's
//! `localStorage`. Everything Stockroom persists goes through it.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   LocalStorage (trait)                                                  │
//! │        │                                                                │
//! │        ├── MemoryStorage   shared HashMap, used by tests and demos      │
//! │        │                                                                │
//! │        └── FileStorage     <data_dir>/<key>.json, one file per key      │
//! │                            written to <key>.json.tmp then renamed       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both backends are cheap to clone; clones share the same underlying data.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Keys
// =============================================================================

/// Storage keys, matching the ones the browser frontend uses.
pub mod keys {
    pub const ITEMS: &str = "inventoryItems";
    pub const CATEGORIES: &str = "inventoryCategories";
    pub const HISTORY: &str = "inventoryHistory";
    pub const CURRENT_USER: &str = "currentUser";
    pub const DARK_MODE: &str = "darkMode";
    pub const LANGUAGE: &str = "language";
}

// =============================================================================
// Trait
// =============================================================================

/// String-keyed blob storage.
pub trait LocalStorage: Send + Sync {
    /// Returns the blob under `key`, or `None` if nothing is stored.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing what was there.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

impl<S: LocalStorage + ?Sized> LocalStorage for Arc<S> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        (**self).remove_item(key)
    }
}

// =============================================================================
// Typed Helpers
// =============================================================================

/// Reads and parses the JSON blob under `key`.
///
/// A blob that does not parse is reported as [`StoreError::Corrupt`].
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: &str,
) -> StoreResult<Option<T>> {
    match storage.get_item(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::corrupt(key, e.to_string())),
    }
}

/// Serializes `value` as JSON and stores it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn LocalStorage,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory storage.
///
/// ## Usage
/// ```rust
/// use stockroom_store::storage::{LocalStorage, MemoryStorage};
///
/// let storage = MemoryStorage::new();
/// storage.set_item("darkMode", "true").unwrap();
/// assert_eq!(storage.get_item("darkMode").unwrap().as_deref(), Some("true"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    read_only: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Makes every later write fail, the way a full browser quota does.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("storage is read-only".to_string()));
        }
        Ok(())
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("storage lock poisoned".to_string()))
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_writable()?;
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.check_writable()?;
        self.lock()?.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// Directory-backed storage: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens storage in `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file storage");
        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::Unavailable(format!(
                "invalid storage key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        debug!(key = %key, bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_basics() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item(keys::ITEMS).unwrap(), None);

        storage.set_item(keys::ITEMS, "[]").unwrap();
        assert_eq!(storage.get_item(keys::ITEMS).unwrap().as_deref(), Some("[]"));

        storage.remove_item(keys::ITEMS).unwrap();
        storage.remove_item(keys::ITEMS).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_clones_share_data() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set_item(keys::DARK_MODE, "true").unwrap();
        assert_eq!(b.get_item(keys::DARK_MODE).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let storage = MemoryStorage::new();
        storage.set_read_only(true);
        assert!(matches!(
            storage.set_item(keys::ITEMS, "[]"),
            Err(StoreError::Unavailable(_))
        ));
        storage.set_read_only(false);
        assert!(storage.set_item(keys::ITEMS, "[]").is_ok());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path().join("data")).unwrap();

        assert_eq!(storage.get_item(keys::HISTORY).unwrap(), None);
        storage.set_item(keys::HISTORY, "[1,2]").unwrap();
        assert!(temp.path().join("data/inventoryHistory.json").exists());
        assert!(!temp.path().join("data/inventoryHistory.json.tmp").exists());

        let reopened = FileStorage::open(temp.path().join("data")).unwrap();
        assert_eq!(
            reopened.get_item(keys::HISTORY).unwrap().as_deref(),
            Some("[1,2]")
        );

        reopened.remove_item(keys::HISTORY).unwrap();
        assert_eq!(storage.get_item(keys::HISTORY).unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::open(temp.path()).unwrap();
        assert!(storage.set_item("../escape", "x").is_err());
        assert!(storage.get_item("").is_err());
    }

    #[test]
    fn test_typed_helpers() {
        let storage = MemoryStorage::new();
        write_json(&storage, "numbers", &vec![1, 2, 3]).unwrap();
        let numbers: Option<Vec<i32>> = read_json(&storage, "numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        storage.set_item("numbers", "not json").unwrap();
        let err = read_json::<Vec<i32>>(&storage, "numbers").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
