//! In-memory ephemeral storage, used as the fallback when the durable
//! backend is unavailable.

use std::collections::HashMap;

use quizdrill_core::traits::SnapshotStore;

/// Key-value store living only for the current process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.values.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key);
        true
    }

    /// Memory never counts as durable storage.
    fn is_available(&self) -> bool {
        false
    }
}
