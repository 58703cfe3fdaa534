//! JSON file backed preference storage.

use std::{
    fs::{create_dir_all, read_to_string, write},
    path::{Path, PathBuf},
};

use {
    parking_lot::{RwLock, RwLockWriteGuard},
    serde_json::{Map, Value, from_str, from_value, to_string_pretty, to_value},
    tracing::{debug, warn},
};

use crate::storage::{PreferenceStore, PreferenceValue, StorageError};

/// Raw file contents. Entries this crate did not write are kept as-is.
type Entries = Map<String, Value>;

/// Stores preferences as a flat JSON object on disk.
///
/// The file is read on first access and cached; every write rewrites the
/// whole file so the on-disk copy always matches the cache. Values are
/// decoded per key, so an unexpected entry only affects reads of that key.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Path to the preferences file.
    path: PathBuf,
    /// Cached file contents, `None` until first loaded.
    entries: RwLock<Option<Entries>>,
}

impl JsonFileStore {
    /// Creates a store for the given file. Nothing is read until first use.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: RwLock::new(None),
        }
    }

    /// Gets the preferences file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a write guard over loaded entries, reading the file if needed.
    fn loaded(&self) -> Result<RwLockWriteGuard<'_, Option<Entries>>, StorageError> {
        let mut guard = self.entries.write();
        if guard.is_none() {
            *guard = Some(self.read_file()?);
        }
        Ok(guard)
    }

    fn read_file(&self) -> Result<Entries, StorageError> {
        if !self.path.exists() {
            debug!("No preferences file at {:?}, starting empty", self.path);
            return Ok(Entries::new());
        }

        debug!("Loading preferences from {:?}", self.path);
        let contents = read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(from_str(&contents)?)
    }

    fn write_file(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)?;
        }

        debug!("Saving preferences to {:?}", self.path);
        let contents = to_string_pretty(entries)?;
        write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>, StorageError> {
        let cached = self
            .entries
            .read()
            .as_ref()
            .map(|entries| entries.get(key).cloned());
        let raw = match cached {
            Some(raw) => raw,
            None => {
                let guard = self.loaded()?;
                guard.as_ref().and_then(|entries| entries.get(key).cloned())
            }
        };

        let Some(raw) = raw else {
            return Ok(None);
        };
        match from_value(raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                warn!("Unreadable preference {:?} in {:?}: {}", key, self.path, error);
                Err(error.into())
            }
        }
    }

    fn set(&self, key: &str, value: PreferenceValue) -> Result<(), StorageError> {
        let mut guard = self.loaded()?;
        let mut updated = (*guard).clone().unwrap_or_default();
        updated.insert(key.to_string(), to_value(&value)?);

        // Cache only changes once the file write succeeded.
        self.write_file(&updated)?;
        *guard = Some(updated);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.loaded()?;
        let mut updated = (*guard).clone().unwrap_or_default();
        if updated.remove(key).is_none() {
            return Ok(());
        }

        self.write_file(&updated)?;
        *guard = Some(updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir, read_to_string, write};

    use tempfile::TempDir;

    use crate::storage::{JsonFileStore, PreferenceStore, PreferenceValue, StorageError};

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("preferences.json"));

        assert_eq!(store.get("encryptionEnabled").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_creates_parent_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("preferences.json");
        let store = JsonFileStore::new(path.clone());

        store.set("encryptionEnabled", PreferenceValue::Bool(true)).unwrap();

        let contents = read_to_string(&path).unwrap();
        assert!(contents.contains("\"encryptionEnabled\": true"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");

        let store = JsonFileStore::new(path.clone());
        store.set("encryptionKey", PreferenceValue::from("abc123")).unwrap();
        store.set("firstTimeOpeningApp", PreferenceValue::Bool(false)).unwrap();
        drop(store);

        let reopened = JsonFileStore::new(path);
        assert_eq!(
            reopened.get("encryptionKey").unwrap(),
            Some(PreferenceValue::Text("abc123".to_string()))
        );
        assert_eq!(
            reopened.get("firstTimeOpeningApp").unwrap(),
            Some(PreferenceValue::Bool(false))
        );
    }

    #[test]
    fn test_remove_deletes_key_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        let store = JsonFileStore::new(path.clone());

        store.set("encryptionKey", PreferenceValue::from("secret")).unwrap();
        store.remove("encryptionKey").unwrap();
        store.remove("encryptionKey").unwrap();

        assert_eq!(store.get("encryptionKey").unwrap(), None);
        assert!(!read_to_string(&path).unwrap().contains("secret"));
    }

    #[test]
    fn test_corrupt_file_surfaces_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(path);
        let result = store.get("encryptionEnabled");
        assert!(matches!(result, Err(StorageError::SerializationError(_))));
    }

    #[test]
    fn test_foreign_entries_do_not_break_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.json");
        write(
            &path,
            r#"{"firstTimeOpeningApp": false, "launchCount": 3, "encryptionEnabled": [1]}"#,
        )
        .unwrap();

        let store = JsonFileStore::new(path.clone());
        assert_eq!(
            store.get("firstTimeOpeningApp").unwrap(),
            Some(PreferenceValue::Bool(false))
        );
        assert!(matches!(
            store.get("encryptionEnabled"),
            Err(StorageError::SerializationError(_))
        ));

        store.set("encryptionKey", PreferenceValue::from("abc123")).unwrap();
        let contents = read_to_string(&path).unwrap();
        assert!(contents.contains("\"launchCount\": 3"));
        assert!(contents.contains("\"encryptionKey\": \"abc123\""));
    }

    #[test]
    fn test_unreadable_path_surfaces_io_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be.
        let path = temp_dir.path().join("preferences.json");
        create_dir(&path).unwrap();

        let store = JsonFileStore::new(path);
        let result = store.set("encryptionEnabled", PreferenceValue::Bool(true));
        assert!(matches!(result, Err(StorageError::IoError(_))));
    }
}
