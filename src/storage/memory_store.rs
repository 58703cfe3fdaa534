//! In-memory preference storage for tests and ephemeral sessions.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::RwLock;

use crate::storage::{PreferenceStore, PreferenceValue, StorageError};

/// Keeps preferences in a map for the lifetime of the value.
///
/// Can be marked unavailable to simulate a failing backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, PreferenceValue>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with `StorageError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                reason: "memory store marked unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>, StorageError> {
        self.check_available()?;
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: PreferenceValue) -> Result<(), StorageError> {
        self.check_available()?;
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.values.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{MemoryStore, PreferenceStore, PreferenceValue, StorageError};

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("encryptionEnabled", PreferenceValue::Bool(true)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("encryptionEnabled").unwrap(),
            Some(PreferenceValue::Bool(true))
        );

        store.remove("encryptionEnabled").unwrap();
        assert_eq!(store.get("encryptionEnabled").unwrap(), None);
    }

    #[test]
    fn test_unavailable_store_fails_every_operation() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.get("encryptionKey"),
            Err(StorageError::Unavailable { .. })
        ));
        assert!(store.set("encryptionKey", PreferenceValue::from("k")).is_err());
        assert!(store.remove("encryptionKey").is_err());

        store.set_unavailable(false);
        assert_eq!(store.get("encryptionKey").unwrap(), None);
    }
}
