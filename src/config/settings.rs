//! Typed preference snapshot and preferences file location.
//!
//! The file location follows the XDG Base Directory specification, with an
//! environment override for tests and portable installs.

use std::{env::var, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "PICTOGRAPH_PREFERENCES";

/// Application directory name under the config home.
const APP_DIR: &str = "pictograph";

/// Preferences file name.
const FILE_NAME: &str = "preferences.json";

/// Snapshot of every user preference with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Whether the app has not been opened before.
    pub first_time_opening_app: bool,
    /// Whether encryption is turned on.
    pub encryption_enabled: bool,
    /// Stored encryption password, if any.
    pub encryption_key: Option<String>,
    /// Whether the password field shows its contents.
    pub show_password_on_screen: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            first_time_opening_app: true,
            encryption_enabled: false,
            encryption_key: None,
            show_password_on_screen: false,
        }
    }
}

impl UserPreferences {
    /// The key to encrypt with, if encryption is on and a key is set.
    #[must_use]
    pub fn active_encryption_key(&self) -> Option<&str> {
        if !self.encryption_enabled {
            return None;
        }
        self.encryption_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// Resolves the preferences file path from the environment.
///
/// # Returns
///
/// `$PICTOGRAPH_PREFERENCES` if set, otherwise
/// `$XDG_CONFIG_HOME/pictograph/preferences.json` (falling back to
/// `$HOME/.config`).
#[must_use]
pub fn get_config_path() -> PathBuf {
    resolve_config_path(
        var(PREFERENCES_PATH_ENV).ok(),
        var("XDG_CONFIG_HOME").ok(),
        var("HOME").ok(),
    )
}

/// Picks the preferences path from already-read environment values.
fn resolve_config_path(
    override_path: Option<String>,
    xdg_config_home: Option<String>,
    home: Option<String>,
) -> PathBuf {
    if let Some(path) = override_path.filter(|path| !path.is_empty()) {
        return PathBuf::from(path);
    }

    let mut config_dir = if let Some(config_home) = xdg_config_home.filter(|dir| !dir.is_empty()) {
        PathBuf::from(config_home)
    } else if let Some(home) = home {
        let mut path = PathBuf::from(home);
        path.push(".config");
        path
    } else {
        // No HOME at all, keep the file next to the working directory
        return PathBuf::from(FILE_NAME);
    };

    config_dir.push(APP_DIR);
    config_dir.push(FILE_NAME);
    config_dir
}
