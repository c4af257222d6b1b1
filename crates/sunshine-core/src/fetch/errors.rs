//! Fetch error types.

use crate::errors::SunshineError;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Weather source not configured: {message}")]
    NotConfigured { message: String },

    #[error("Forecast request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Forecast request failed: {message}")]
    Network { message: String },

    #[error("Forecast server returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Could not parse forecast response: {message}")]
    Parse { message: String },

    #[error("Forecast response contained no entries")]
    EmptyForecast,

    #[error("Fetcher fault: {message}")]
    Internal { message: String },
}

impl FetchError {
    /// Whether a later attempt could succeed without user intervention.
    ///
    /// Only a missing API key or location is permanent.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::NotConfigured { .. })
    }
}

impl SunshineError for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            FetchError::NotConfigured { .. } => "FETCH_NOT_CONFIGURED",
            FetchError::Timeout { .. } => "FETCH_TIMEOUT",
            FetchError::Network { .. } => "FETCH_NETWORK",
            FetchError::HttpStatus { .. } => "FETCH_HTTP_STATUS",
            FetchError::Parse { .. } => "FETCH_PARSE",
            FetchError::EmptyForecast => "FETCH_EMPTY_FORECAST",
            FetchError::Internal { .. } => "FETCH_INTERNAL",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, FetchError::NotConfigured { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_is_permanent() {
        let error = FetchError::NotConfigured {
            message: "no API key".to_string(),
        };
        assert!(!error.is_retryable());
        assert!(error.is_user_error());
        assert_eq!(error.error_code(), "FETCH_NOT_CONFIGURED");
        assert_eq!(
            error.to_string(),
            "Weather source not configured: no API key"
        );
    }

    #[test]
    fn test_transient_errors_are_retryable() {
        assert!(FetchError::Timeout { secs: 10 }.is_retryable());
        assert!(FetchError::EmptyForecast.is_retryable());
        assert!(
            FetchError::HttpStatus {
                status: 503,
                message: "unavailable".to_string()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            FetchError::Timeout { secs: 10 }.to_string(),
            "Forecast request timed out after 10s"
        );
    }
}
