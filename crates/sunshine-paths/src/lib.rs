use std::path::{Path, PathBuf};

/// Environment variable that relocates the whole `~/.sunshine` tree.
pub const HOME_ENV_VAR: &str = "SUNSHINE_HOME";

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("home directory not found — set $HOME or $SUNSHINE_HOME")]
    HomeNotFound,
}

/// Centralized path construction for the `~/.sunshine/` directory layout.
///
/// Single source of truth for every path under `~/.sunshine/`. Use `resolve()`
/// in production code and `from_dir()` in tests.
#[derive(Debug, Clone)]
pub struct SunshinePaths {
    sunshine_dir: PathBuf,
}

impl SunshinePaths {
    /// Resolve paths from `$SUNSHINE_HOME`, falling back to `~/.sunshine`.
    pub fn resolve() -> Result<Self, PathError> {
        if let Some(dir) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self {
                sunshine_dir: PathBuf::from(dir),
            });
        }

        let home = dirs::home_dir().ok_or(PathError::HomeNotFound)?;
        Ok(Self {
            sunshine_dir: home.join(".sunshine"),
        })
    }

    /// Create paths from an explicit base directory. Use in tests.
    pub fn from_dir(sunshine_dir: PathBuf) -> Self {
        Self { sunshine_dir }
    }

    /// The base `~/.sunshine` directory.
    pub fn sunshine_dir(&self) -> &Path {
        &self.sunshine_dir
    }

    // --- Top-level files ---

    pub fn user_config(&self) -> PathBuf {
        self.sunshine_dir.join("config.toml")
    }

    /// Key-value preference file (notification state, unit flag, breadcrumbs).
    pub fn preferences_file(&self) -> PathBuf {
        self.sunshine_dir.join("prefs.json")
    }

    pub fn forecast_cache(&self) -> PathBuf {
        self.sunshine_dir.join("forecast.json")
    }

    // --- Static helpers (no self) ---

    /// Project-level config: `<project_root>/.sunshine/config.toml`.
    pub fn project_config(project_root: &Path) -> PathBuf {
        project_root.join(".sunshine").join("config.toml")
    }
}
