use std::error::Error;

/// Base trait for all application errors
pub trait SunshineError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

impl SunshineError for sunshine_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            sunshine_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            sunshine_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            sunshine_config::ConfigError::PathResolution { .. } => "CONFIG_PATH_UNRESOLVED",
            sunshine_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            sunshine_config::ConfigError::ConfigParseError { .. }
                | sunshine_config::ConfigError::InvalidConfiguration { .. }
        )
    }
}

impl SunshineError for sunshine_paths::PathError {
    fn error_code(&self) -> &'static str {
        match self {
            sunshine_paths::PathError::HomeNotFound => "HOME_NOT_FOUND",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error() {
        let error = sunshine_config::ConfigError::ConfigParseError {
            message: "invalid TOML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse config file: invalid TOML syntax"
        );
        assert_eq!(error.error_code(), "CONFIG_PARSE_ERROR");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_config_io_error_is_not_user_error() {
        let error = sunshine_config::ConfigError::from(std::io::Error::other("disk"));
        assert_eq!(error.error_code(), "CONFIG_IO_ERROR");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_home_not_found() {
        let error = sunshine_paths::PathError::HomeNotFound;
        assert_eq!(error.error_code(), "HOME_NOT_FOUND");
        assert!(error.is_user_error());
    }
}
