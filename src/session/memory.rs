//! In-memory storage backend for deterministic tests and ephemeral use.

use dashmap::DashMap;

use super::StorageBackend;

/// Process-local key/value store.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: DashMap<String, String>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}
