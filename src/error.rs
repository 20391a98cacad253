use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the preferences store.
#[derive(Debug, Clone, Error)]
pub enum PreferencesError {
    #[error("invalid preferences: {0}")]
    Validation(String),

    #[error("failed to persist preferences to {}: {message}", .path.display())]
    Persistence { path: PathBuf, message: String },

    #[error("unknown preference key: {0}")]
    NotFound(String),
}

impl PreferencesError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        PreferencesError::Persistence {
            path: path.into(),
            message: format!("{err:#}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PreferencesError>;

impl crate::config::PatchSkip {
    /// Turn a skipped patch entry into an error for callers that want strict feedback.
    pub fn into_error(self, key: &str) -> PreferencesError {
        match self {
            crate::config::PatchSkip::NotFound => PreferencesError::NotFound(key.to_string()),
            crate::config::PatchSkip::TypeMismatch => {
                PreferencesError::Validation(format!("{key}: value has the wrong type"))
            }
        }
    }
}
