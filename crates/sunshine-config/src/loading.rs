//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.sunshine/config.toml` (or `$SUNSHINE_HOME/config.toml`)
//! 3. **Project config** - `./.sunshine/config.toml`
//! 4. **Environment** - `SUNSHINE_API_KEY` (highest priority)

use crate::errors::ConfigError;
use crate::types::{
    ApiConfig, DebugConfig, LocationConfig, NotificationConfig, SunshineConfig, SyncConfig,
};
use crate::validation::validate_config;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Environment variable that overrides `[api] key`.
pub const API_KEY_ENV_VAR: &str = "SUNSHINE_API_KEY";

fn is_file_not_found(e: &ConfigError) -> bool {
    matches!(e, ConfigError::IoError { source } if source.kind() == std::io::ErrorKind::NotFound)
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if the
/// merged configuration fails validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<SunshineConfig, ConfigError> {
    let paths =
        sunshine_paths::SunshinePaths::resolve().map_err(|e| ConfigError::PathResolution {
            message: e.to_string(),
        })?;
    let project_root = std::env::current_dir()?;

    load_hierarchy_from(
        &paths.user_config(),
        &sunshine_paths::SunshinePaths::project_config(&project_root),
    )
}

/// Load and merge the given user and project config files.
pub fn load_hierarchy_from(
    user_config: &Path,
    project_config: &Path,
) -> Result<SunshineConfig, ConfigError> {
    let mut config = SunshineConfig::default();

    for path in [user_config, project_config] {
        match load_config_file(path) {
            Ok(file_config) => config = merge_configs(config, file_config),
            Err(e) if !is_file_not_found(&e) => return Err(e),
            Err(_) => {
                debug!(
                    event = "config.load.file_missing",
                    path = %path.display(),
                );
            }
        }
    }

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<SunshineConfig, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|e| std::io::Error::new(e.kind(), format!("'{}': {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })
}

fn apply_env_overrides(config: &mut SunshineConfig) {
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR)
        && !key.trim().is_empty()
    {
        config.api.key = Some(key);
    }
}

/// Merge two configurations, with override_config taking precedence.
///
/// For optional fields, override values replace base values only if present.
pub fn merge_configs(base: SunshineConfig, override_config: SunshineConfig) -> SunshineConfig {
    SunshineConfig {
        location: LocationConfig::merge(&base.location, &override_config.location),
        api: ApiConfig::merge(&base.api, &override_config.api),
        sync: SyncConfig::merge(&base.sync, &override_config.sync),
        notifications: NotificationConfig::merge(
            &base.notifications,
            &override_config.notifications,
        ),
        debug: DebugConfig::merge(&base.debug, &override_config.debug),
    }
}
