//! The signed-in user held by the data controller.

/// Identity of whoever is using the app.
///
/// The data controller only stores and hands out a shared reference to
/// this value; it never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurrentUser {
    /// Account name, `None` while nobody is signed in.
    pub username: Option<String>,
    /// Name shown in the interface.
    pub display_name: Option<String>,
}

impl CurrentUser {
    /// Creates a signed-in user.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            display_name: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.username.is_some()
    }

    /// Display name, falling back to the username.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.username.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use crate::state::CurrentUser;

    #[test]
    fn test_default_user_is_anonymous() {
        let user = CurrentUser::default();
        assert!(!user.is_signed_in());
        assert_eq!(user.name(), None);
    }

    #[test]
    fn test_name_prefers_display_name() {
        let user = CurrentUser::new("marie");
        assert_eq!(user.name(), Some("marie"));

        let user = user.with_display_name("Marie Curie");
        assert!(user.is_signed_in());
        assert_eq!(user.name(), Some("Marie Curie"));
    }
}
