//! File-backed storage: a single JSON object on disk.
//!
//! Every mutation rewrites the whole file; every read re-reads it, so any
//! reader in the same process observes the most recent completed write and
//! the contents survive a full process restart. An unreadable or garbled
//! file is treated as an empty store.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use super::StorageBackend;

/// Durable key/value store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) {
        // String-keyed string map; serialization cannot fail
        let raw = serde_json::to_string_pretty(map).unwrap_or_default();
        if let Err(e) = fs::write(&self.path, raw) {
            // Storage operations are total; a write failure degrades to
            // losing durability, which the caller cannot act on anyway
            tracing::error!(path = %self.path.display(), error = %e, "Failed to persist storage file");
        }
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map);
        }
    }
}
