use serde::Serialize;
use tracing::{error, warn};

use sunshine_config::SunshineConfig;
use sunshine_core::errors::SunshineError;
use sunshine_core::prefs::JsonPreferenceStore;
use sunshine_core::sync::SyncContext;
use sunshine_paths::SunshinePaths;

use crate::color;

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> SunshineConfig {
    match SunshineConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{} Could not load config: {}. Using defaults.\n{}",
                color::warning("Warning:"),
                e,
                color::hint(
                    "Tip: Check ~/.sunshine/config.toml and ./.sunshine/config.toml for syntax errors."
                ),
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            SunshineConfig::default()
        }
    }
}

/// Print `error` to stderr, log it, and hand it back boxed.
pub fn report_error<E: SunshineError>(context: &str, e: E) -> Box<dyn std::error::Error> {
    eprintln!("{} {}: {}", color::error("Error:"), context, e);
    error!(
        event = "cli.command_failed",
        context = context,
        error_code = e.error_code(),
        error = %e,
    );
    Box::new(e)
}

pub fn resolve_paths() -> Result<SunshinePaths, Box<dyn std::error::Error>> {
    SunshinePaths::resolve().map_err(|e| report_error("Could not locate the Sunshine directory", e))
}

pub fn open_store(paths: &SunshinePaths) -> Result<JsonPreferenceStore, Box<dyn std::error::Error>> {
    JsonPreferenceStore::open(&paths.preferences_file())
        .map_err(|e| report_error("Could not open preferences", e))
}

pub fn open_context() -> Result<SyncContext, Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    let paths = resolve_paths()?;
    SyncContext::open(&paths, config).map_err(|e| report_error("Could not prepare sync", e))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
