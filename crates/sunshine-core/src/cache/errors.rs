use crate::errors::SunshineError;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to read forecast cache at {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write forecast cache at {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize forecast cache: {message}")]
    SerializeFailed { message: String },
}

impl SunshineError for CacheError {
    fn error_code(&self) -> &'static str {
        match self {
            CacheError::ReadFailed { .. } => "CACHE_READ_FAILED",
            CacheError::WriteFailed { .. } => "CACHE_WRITE_FAILED",
            CacheError::SerializeFailed { .. } => "CACHE_SERIALIZE_FAILED",
        }
    }
}
