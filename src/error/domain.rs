//! Domain-specific error types using `thiserror`.

use std::result::Result as StdResult;

use {anyhow::Error, thiserror::Error};

use crate::{config::PreferenceKey, storage::StorageError};

/// Errors raised by the data controller.
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// Backing store failed to read or persist a value.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// A stored value has a different type than the key expects.
    #[error("Type mismatch for {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: PreferenceKey,
        expected: &'static str,
        found: &'static str,
    },
}

/// Operational error context propagation with `anyhow`.
pub type Result<T> = StdResult<T, Error>;

#[cfg(test)]
mod tests {
    use crate::{config::PreferenceKey, error::PreferenceError, storage::StorageError};

    #[test]
    fn test_type_mismatch_display() {
        let error = PreferenceError::TypeMismatch {
            key: PreferenceKey::EncryptionEnabled,
            expected: "bool",
            found: "string",
        };
        assert_eq!(
            error.to_string(),
            "Type mismatch for encryptionEnabled: expected bool, found string"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let error: PreferenceError = StorageError::Unavailable {
            reason: "offline".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "Storage error: Storage unavailable: offline");
    }
}
