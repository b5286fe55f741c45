//! Flat key-value storage for persisted collections
//!
//! Every persisted collection (scan history, liked songs) is written whole as a
//! JSON array under a single key. The file-backed store keeps one file per key
//! inside the cache directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

pub const CACHE_DIR: &str = ".cache";

pub const SCAN_HISTORY_KEY: &str = "scanHistory";
pub const LIKED_SONGS_KEY: &str = "likedSongs";

/// Synchronous flat key-value store
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(CACHE_DIR)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "Failed to read stored value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        // Write to a sibling file first so a crash never leaves half a collection
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store, used by tests and as a fallback when nothing should touch disk
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Decode the JSON stored under `key`.
///
/// Returns `Ok(None)` when nothing is stored and `Err(StorageError::Parse)` when
/// the stored text is not valid for `T`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError> {
    let Some(content) = store.get(key) else {
        return Ok(None);
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StorageError::Parse { key: key.to_string(), source })
}

/// Load a collection, treating absent or malformed data as empty
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unreadable stored data");
            T::default()
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let content = serde_json::to_string(value)
        .map_err(|source| StorageError::Encode { key: key.to_string(), source })?;
    store.set(key, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_returns_what_was_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);

        store.set("k", "[1,2]").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("[1,2]"));
    }

    #[test]
    fn file_store_creates_directory_and_round_trips() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(temp_dir.path().join("nested"));

        save_json(&store, LIKED_SONGS_KEY, &vec![3u32, 7]).unwrap();

        assert!(store.dir().join("likedSongs.json").exists());
        let loaded: Option<Vec<u32>> = load_json(&store, LIKED_SONGS_KEY).unwrap();
        assert_eq!(loaded, Some(vec![3, 7]));
    }

    #[test]
    fn file_store_missing_key_is_absent() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(temp_dir.path());
        assert_eq!(store.get(SCAN_HISTORY_KEY), None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let store = MemoryStore::new();
        store.set(SCAN_HISTORY_KEY, "{not json").unwrap();

        let result: Result<Option<Vec<u32>>, _> = load_json(&store, SCAN_HISTORY_KEY);
        assert!(matches!(result, Err(StorageError::Parse { .. })));
    }

    #[test]
    fn load_or_default_recovers_from_malformed_json() {
        let store = MemoryStore::new();
        store.set(LIKED_SONGS_KEY, "\"oops\"").unwrap();

        let liked: Vec<u32> = load_or_default(&store, LIKED_SONGS_KEY);
        assert!(liked.is_empty());
    }
}
