//! In-memory store for tests and dry runs.

use std::collections::HashMap;

use super::{KeyValueStore, StorageError, validate_key};

/// `HashMap`-backed [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.get("orders").unwrap().is_none());

        store.set("orders", "[]").unwrap();
        store.set("orders", "[1]").unwrap();
        assert_eq!(store.get("orders").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rejects_bad_key() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.set("a/b", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
