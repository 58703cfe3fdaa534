//! Key/value persistence port for user preferences.
//!
//! This module defines the `PreferenceStore` trait the data controller
//! depends on, together with a durable JSON file implementation and an
//! in-memory implementation for tests.

pub mod file_store;
pub mod memory_store;

use std::{fmt::Debug, io::Error as StdError};

use {
    serde::{Deserialize, Serialize},
    serde_json::Error as SerdeJsonError,
    thiserror::Error,
};

pub use {file_store::JsonFileStore, memory_store::MemoryStore};

/// Error type for storage backend operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or write the backing file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize stored values.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Backing store cannot be reached.
    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

/// A single persisted preference value.
///
/// Stored as a bare JSON boolean or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    /// Boolean flag.
    Bool(bool),
    /// Free-form text.
    Text(String),
}

impl PreferenceValue {
    /// Returns the boolean payload, if this is a flag.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PreferenceValue::Bool(value) => Some(*value),
            PreferenceValue::Text(_) => None,
        }
    }

    /// Returns the text payload, if this is a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PreferenceValue::Text(value) => Some(value),
            PreferenceValue::Bool(_) => None,
        }
    }

    /// Name of the value type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            PreferenceValue::Bool(_) => "bool",
            PreferenceValue::Text(_) => "string",
        }
    }
}

impl From<bool> for PreferenceValue {
    fn from(value: bool) -> Self {
        PreferenceValue::Bool(value)
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        PreferenceValue::Text(value.to_string())
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        PreferenceValue::Text(value)
    }
}

/// Durable key/value storage for preference values.
///
/// Implementations must be safe to share across threads; the data
/// controller holds one behind an `Arc`.
pub trait PreferenceStore: Debug + Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be persisted.
    fn set(&self, key: &str, value: PreferenceValue) -> Result<(), StorageError>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the change cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
