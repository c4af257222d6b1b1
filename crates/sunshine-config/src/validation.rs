//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::SunshineConfig;

/// Validate a SunshineConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `notifications.quiet_until_hour` must be an hour of day (0-23)
/// - `sync.interval_hours` and `sync.fetch_timeout_secs` must be at least 1
/// - `sync.retry_base_secs` must not exceed `sync.retry_max_secs`
/// - `location.lat` / `location.lon` must be given together and lie in range
pub fn validate_config(config: &SunshineConfig) -> Result<(), ConfigError> {
    let quiet = config.notifications.quiet_until_hour();
    if quiet > 23 {
        return Err(invalid(format!(
            "notifications.quiet_until_hour must be between 0 and 23, got {}",
            quiet
        )));
    }

    if config.sync.interval_hours() == 0 {
        return Err(invalid("sync.interval_hours must be at least 1".to_string()));
    }

    if config.sync.fetch_timeout_secs() == 0 {
        return Err(invalid(
            "sync.fetch_timeout_secs must be at least 1".to_string(),
        ));
    }

    if config.sync.retry_base_secs() > config.sync.retry_max_secs() {
        return Err(invalid(format!(
            "sync.retry_base_secs ({}) exceeds sync.retry_max_secs ({})",
            config.sync.retry_base_secs(),
            config.sync.retry_max_secs()
        )));
    }

    let location = &config.location;
    match (location.lat, location.lon) {
        (Some(_), None) | (None, Some(_)) => {
            return Err(invalid(
                "location.lat and location.lon must be set together".to_string(),
            ));
        }
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(invalid(format!("location.lat out of range: {}", lat)));
            }
            if !(-180.0..=180.0).contains(&lon) {
                return Err(invalid(format!("location.lon out of range: {}", lon)));
            }
        }
        (None, None) => {}
    }

    Ok(())
}

fn invalid(message: String) -> ConfigError {
    ConfigError::InvalidConfiguration { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SunshineConfig::default()).is_ok());
    }

    #[test]
    fn test_quiet_hour_out_of_range() {
        let mut config = SunshineConfig::default();
        config.notifications.quiet_until_hour = Some(24);
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("quiet_until_hour"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = SunshineConfig::default();
        config.sync.interval_hours = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = SunshineConfig::default();
        config.sync.fetch_timeout_secs = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_retry_base_above_cap_rejected() {
        let mut config = SunshineConfig::default();
        config.sync.retry_base_secs = Some(600);
        config.sync.retry_max_secs = Some(60);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_half_coordinates_rejected() {
        let mut config = SunshineConfig::default();
        config.location.lat = Some(44.3);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_coordinates_out_of_range_rejected() {
        let mut config = SunshineConfig::default();
        config.location.lat = Some(95.0);
        config.location.lon = Some(23.8);
        assert!(validate_config(&config).is_err());

        config.location.lat = Some(44.3);
        config.location.lon = Some(-181.0);
        assert!(validate_config(&config).is_err());
    }
}
