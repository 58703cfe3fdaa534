//! Operational error context propagation with `anyhow`.
//!
//! Extension traits for attaching context to preference errors and a
//! reporter that logs them and turns them into short user-facing text.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Error, Result as AnyhowResult},
    tracing::error,
};

use crate::{error::PreferenceError, storage::StorageError};

/// Extension trait for enhanced error context.
pub trait ResultExt<T, E> {
    /// Adds context to an error with a static string.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Adds context to an error with a formatted string.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// Centralized error reporting and logging.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Logs a failure, including the full cause chain.
    pub fn error(error: &Error, context: &str) {
        error!(context = context, error = %format!("{error:#}"), "Preference operation failed");
    }

    /// Converts an error to a user-friendly message.
    ///
    /// Storage failures anywhere in the chain are reported as a problem
    /// with the preferences file; anything else falls back to the
    /// top-level message.
    pub fn to_user_message(error: &Error) -> String {
        for cause in error.chain() {
            if let Some(preference_error) = cause.downcast_ref::<PreferenceError>() {
                return match preference_error {
                    PreferenceError::Storage(storage_error) => {
                        Self::storage_message(storage_error)
                    }
                    PreferenceError::TypeMismatch { key, .. } => {
                        format!("The saved value for {key} is invalid; set it again to repair it.")
                    }
                };
            }
            if let Some(storage_error) = cause.downcast_ref::<StorageError>() {
                return Self::storage_message(storage_error);
            }
        }

        error.to_string()
    }

    fn storage_message(error: &StorageError) -> String {
        match error {
            StorageError::IoError(io_error) => {
                format!("Could not access the preferences file: {io_error}")
            }
            StorageError::SerializationError(_) => {
                "The preferences file is corrupted.".to_string()
            }
            StorageError::Unavailable { reason } => {
                format!("Preferences are unavailable: {reason}")
            }
        }
    }
}
