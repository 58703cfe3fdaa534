//! Pictograph preferences
//!
//! User preference storage for the Pictograph image encoder: first-launch
//! state, encryption settings, and the current user reference, persisted
//! through a pluggable key/value store.

pub mod config;
pub mod error;
pub mod state;
pub mod storage;

// Re-export key types for convenience
pub use {
    config::{PreferenceKey, UserPreferences},
    error::PreferenceError,
    state::{CurrentUser, DataController, PreferenceEvent, shared_instance},
    storage::{JsonFileStore, MemoryStore, PreferenceStore, PreferenceValue, StorageError},
};
