//! # sunshine-config
//!
//! TOML configuration types, loading, and validation for Sunshine.
//!
//! Single source of truth for `SunshineConfig`. Depends only on `sunshine-paths`.

mod loading;
mod validation;

pub mod errors;
pub mod types;

// Public API re-exports
pub use errors::ConfigError;
pub use loading::{API_KEY_ENV_VAR, load_config_file, load_hierarchy_from, merge_configs};
pub use types::{
    ApiConfig, DebugConfig, LocationConfig, NotificationConfig, SunshineConfig, SyncConfig,
};
pub use validation::validate_config;

impl SunshineConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
