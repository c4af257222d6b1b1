//! Preference store error types.

use crate::errors::SunshineError;

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("Failed to write preferences to '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read preferences from '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize preferences: {message}")]
    SerializeFailed { message: String },
}

impl SunshineError for PrefsError {
    fn error_code(&self) -> &'static str {
        match self {
            PrefsError::WriteFailed { .. } => "PREFS_WRITE_FAILED",
            PrefsError::ReadFailed { .. } => "PREFS_READ_FAILED",
            PrefsError::SerializeFailed { .. } => "PREFS_SERIALIZE_FAILED",
        }
    }
}
