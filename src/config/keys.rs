//! Names of the persisted preference keys.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A preference persisted by the data controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// Whether the app has not been opened before.
    FirstTimeOpeningApp,
    /// Whether images are encrypted with the user's key.
    EncryptionEnabled,
    /// The user's encryption password.
    EncryptionKey,
    /// Whether the encryption password is shown unmasked.
    ShowPasswordOnScreen,
}

impl PreferenceKey {
    /// Every key, in display order.
    pub const ALL: [PreferenceKey; 4] = [
        PreferenceKey::FirstTimeOpeningApp,
        PreferenceKey::EncryptionEnabled,
        PreferenceKey::EncryptionKey,
        PreferenceKey::ShowPasswordOnScreen,
    ];

    /// Key name as written to the backing store.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::FirstTimeOpeningApp => "firstTimeOpeningApp",
            PreferenceKey::EncryptionEnabled => "encryptionEnabled",
            PreferenceKey::EncryptionKey => "encryptionKey",
            PreferenceKey::ShowPasswordOnScreen => "showPasswordOnScreen",
        }
    }
}

impl Display for PreferenceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::PreferenceKey;

    #[test]
    fn test_key_names_match_stored_names() {
        assert_eq!(
            PreferenceKey::FirstTimeOpeningApp.as_str(),
            "firstTimeOpeningApp"
        );
        assert_eq!(PreferenceKey::EncryptionEnabled.as_str(), "encryptionEnabled");
        assert_eq!(PreferenceKey::EncryptionKey.to_string(), "encryptionKey");
    }

    #[test]
    fn test_key_names_are_unique() {
        let names: HashSet<_> = PreferenceKey::ALL.iter().map(PreferenceKey::as_str).collect();
        assert_eq!(names.len(), PreferenceKey::ALL.len());
    }
}
