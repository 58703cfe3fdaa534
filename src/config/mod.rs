//! Preference keys, typed snapshots, and file location resolution.
//!
//! This module names the persisted preference keys and resolves where the
//! preferences file lives, following the XDG Base Directory layout.

pub mod keys;
pub mod settings;

pub use {
    keys::PreferenceKey,
    settings::{UserPreferences, get_config_path},
};
