//! User preference access with persistence and change notifications.
//!
//! The `DataController` reads and writes preference flags through a
//! `PreferenceStore`, holds the current user reference, and notifies
//! subscribers whenever either changes.

use std::sync::{Arc, OnceLock};

use {
    async_channel::{Receiver, Sender, unbounded},
    parking_lot::RwLock,
    tracing::{debug, info},
};

use crate::{
    config::{PreferenceKey, UserPreferences, get_config_path},
    error::PreferenceError,
    state::CurrentUser,
    storage::{JsonFileStore, PreferenceStore, PreferenceValue},
};

/// Process-wide controller, created on first use.
static SHARED: OnceLock<Arc<DataController>> = OnceLock::new();

/// Preference change events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceEvent {
    /// First-launch flag changed.
    FirstTimeOpeningAppChanged(bool),
    /// Encryption was turned on or off.
    EncryptionEnabledChanged(bool),
    /// Encryption key was set or cleared. The key itself is not broadcast.
    EncryptionKeyChanged { is_set: bool },
    /// Password visibility changed.
    ShowPasswordOnScreenChanged(bool),
    /// A different user reference was installed.
    UserChanged(Arc<CurrentUser>),
}

/// Typed accessors over persisted preferences plus the current user.
///
/// Construct one per application session with [`DataController::new`] and
/// share it by `Arc`, or use [`shared_instance`] for the process-wide one.
#[derive(Debug)]
pub struct DataController {
    /// Backing key/value storage.
    store: Arc<dyn PreferenceStore>,
    /// Current user reference.
    user: RwLock<Arc<CurrentUser>>,
    /// Active subscribers for manual broadcast fan-out.
    subscribers: RwLock<Vec<Sender<PreferenceEvent>>>,
}

/// Returns the process-wide data controller.
///
/// The first call creates it over the JSON file at [`get_config_path`];
/// later calls return the same instance. The file is not read until a
/// preference is first accessed, so this never fails.
pub fn shared_instance() -> Arc<DataController> {
    SHARED
        .get_or_init(|| {
            let path = get_config_path();
            debug!("DataController: creating shared instance over {:?}", path);
            Arc::new(DataController::new(Arc::new(JsonFileStore::new(path))))
        })
        .clone()
}

impl DataController {
    /// Creates a controller over the given store with an anonymous user.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self::with_user(store, Arc::new(CurrentUser::default()))
    }

    /// Creates a controller over the given store and user.
    pub fn with_user(store: Arc<dyn PreferenceStore>, user: Arc<CurrentUser>) -> Self {
        Self {
            store,
            user: RwLock::new(user),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Whether the app is being opened for the first time.
    ///
    /// # Returns
    ///
    /// The stored flag, or `true` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the store fails or holds a non-boolean.
    pub fn get_first_time_opening_app(&self) -> Result<bool, PreferenceError> {
        self.read_bool(PreferenceKey::FirstTimeOpeningApp, true)
    }

    /// Persists the first-launch flag.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the value cannot be persisted.
    pub fn set_first_time_opening_app(&self, first_time: bool) -> Result<(), PreferenceError> {
        self.write(PreferenceKey::FirstTimeOpeningApp, first_time.into())?;
        self.broadcast_event(&PreferenceEvent::FirstTimeOpeningAppChanged(first_time));
        Ok(())
    }

    /// Whether encryption is turned on.
    ///
    /// # Returns
    ///
    /// The stored flag, or `false` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the store fails or holds a non-boolean.
    pub fn get_encryption_enabled(&self) -> Result<bool, PreferenceError> {
        self.read_bool(PreferenceKey::EncryptionEnabled, false)
    }

    /// Persists the encryption flag.
    ///
    /// Turning encryption off keeps the stored key so it can be re-enabled.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the value cannot be persisted.
    pub fn set_encryption_enabled(&self, enabled: bool) -> Result<(), PreferenceError> {
        self.write(PreferenceKey::EncryptionEnabled, enabled.into())?;
        self.broadcast_event(&PreferenceEvent::EncryptionEnabledChanged(enabled));
        Ok(())
    }

    /// The stored encryption key, whether or not encryption is enabled.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the store fails or holds a non-string.
    pub fn get_encryption_key(&self) -> Result<Option<String>, PreferenceError> {
        let key = PreferenceKey::EncryptionKey;
        let Some(value) = self.store.get(key.as_str())? else {
            return Ok(None);
        };
        value
            .as_text()
            .map(|text| Some(text.to_string()))
            .ok_or_else(|| PreferenceError::TypeMismatch {
                key,
                expected: "string",
                found: value.type_name(),
            })
    }

    /// Persists the encryption key. The key format is not validated.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the value cannot be persisted.
    pub fn set_encryption_key(&self, new_key: &str) -> Result<(), PreferenceError> {
        self.write(PreferenceKey::EncryptionKey, new_key.into())?;
        self.broadcast_event(&PreferenceEvent::EncryptionKeyChanged { is_set: true });
        Ok(())
    }

    /// Removes the stored encryption key.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the change cannot be persisted.
    pub fn clear_encryption_key(&self) -> Result<(), PreferenceError> {
        debug!("DataController: clearing {}", PreferenceKey::EncryptionKey);
        self.store.remove(PreferenceKey::EncryptionKey.as_str())?;
        self.broadcast_event(&PreferenceEvent::EncryptionKeyChanged { is_set: false });
        Ok(())
    }

    /// The key to encrypt with: set only while encryption is enabled and
    /// the stored key is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if either value cannot be read.
    pub fn active_encryption_key(&self) -> Result<Option<String>, PreferenceError> {
        let encryption = UserPreferences {
            encryption_enabled: self.get_encryption_enabled()?,
            encryption_key: self.get_encryption_key()?,
            ..UserPreferences::default()
        };
        Ok(encryption.active_encryption_key().map(str::to_string))
    }

    /// Whether the encryption password is shown unmasked.
    ///
    /// # Returns
    ///
    /// The stored flag, or `false` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the store fails or holds a non-boolean.
    pub fn get_show_password_on_screen(&self) -> Result<bool, PreferenceError> {
        self.read_bool(PreferenceKey::ShowPasswordOnScreen, false)
    }

    /// Persists the password visibility flag.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if the value cannot be persisted.
    pub fn set_show_password_on_screen(&self, show: bool) -> Result<(), PreferenceError> {
        self.write(PreferenceKey::ShowPasswordOnScreen, show.into())?;
        self.broadcast_event(&PreferenceEvent::ShowPasswordOnScreenChanged(show));
        Ok(())
    }

    /// Reads every preference into one snapshot.
    ///
    /// # Errors
    ///
    /// Returns `PreferenceError` if any value cannot be read.
    pub fn preferences(&self) -> Result<UserPreferences, PreferenceError> {
        Ok(UserPreferences {
            first_time_opening_app: self.get_first_time_opening_app()?,
            encryption_enabled: self.get_encryption_enabled()?,
            encryption_key: self.get_encryption_key()?,
            show_password_on_screen: self.get_show_password_on_screen()?,
        })
    }

    /// The current user reference.
    #[must_use]
    pub fn user(&self) -> Arc<CurrentUser> {
        self.user.read().clone()
    }

    /// Replaces the current user reference.
    pub fn set_user(&self, user: Arc<CurrentUser>) {
        info!(
            "DataController: current user is now {}",
            user.name().unwrap_or("<anonymous>")
        );
        *self.user.write() = user.clone();
        self.broadcast_event(&PreferenceEvent::UserChanged(user));
    }

    /// Subscribes to preference changes.
    ///
    /// # Returns
    ///
    /// A receiver for every change made after this call.
    pub fn subscribe(&self) -> Receiver<PreferenceEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.write().push(tx);
        rx
    }

    fn read_bool(&self, key: PreferenceKey, default: bool) -> Result<bool, PreferenceError> {
        let Some(value) = self.store.get(key.as_str())? else {
            return Ok(default);
        };
        value.as_bool().ok_or_else(|| PreferenceError::TypeMismatch {
            key,
            expected: "bool",
            found: value.type_name(),
        })
    }

    fn write(&self, key: PreferenceKey, value: PreferenceValue) -> Result<(), PreferenceError> {
        debug!("DataController: writing {}", key);
        self.store.set(key.as_str(), value)?;
        Ok(())
    }

    /// Sends an event to every subscriber, dropping closed channels.
    fn broadcast_event(&self, event: &PreferenceEvent) -> usize {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.try_send(event.clone()).is_ok());
        subscribers.len()
    }
}
