//! In-Memory Key-Value Store
//!
//! Implements `KeyValueStore` over a locked `HashMap`. Never fails.

use crate::domain::StoreError;
use crate::ports::KeyValueStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory key-value store for tests and ephemeral hosts.
#[derive(Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryKvStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.write().insert(key, value);
        Ok(())
    }
}
