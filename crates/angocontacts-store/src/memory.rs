use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::StorageError;
use crate::kv::{validate_key, KeyValueStore};

/// In-process backend. Counts writes so callers can assert that a no-op
/// operation did not touch storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` without counting a write.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Number of successful [`KeyValueStore::write`] calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read("nothing").unwrap(), None);
    }

    #[test]
    fn write_then_read_returns_value_and_counts() {
        let store = MemoryStore::new();
        store.write("k", "[1]").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn seeded_entries_do_not_count_as_writes() {
        let store = MemoryStore::new().with_entry("k", "[]");
        assert_eq!(store.get("k").as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 0);
    }
}
