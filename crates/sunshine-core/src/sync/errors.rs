//! Errors raised while assembling a sync run.
//!
//! A running sync never fails with these: fetch errors become a
//! [`RefreshOutcome`](super::RefreshOutcome) and cache or notification
//! problems are logged.

use crate::cache::CacheError;
use crate::errors::SunshineError;
use crate::fetch::FetchError;
use crate::prefs::PrefsError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Prefs(#[from] PrefsError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl SunshineError for SyncError {
    fn error_code(&self) -> &'static str {
        match self {
            SyncError::Prefs(e) => e.error_code(),
            SyncError::Cache(e) => e.error_code(),
            SyncError::Fetch(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            SyncError::Prefs(e) => e.is_user_error(),
            SyncError::Cache(e) => e.is_user_error(),
            SyncError::Fetch(e) => e.is_user_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_delegates() {
        let error = SyncError::from(FetchError::Internal {
            message: "tls backend".to_string(),
        });
        assert_eq!(error.error_code(), "FETCH_INTERNAL");
        assert_eq!(error.to_string(), "Fetcher fault: tls backend");
    }
}
