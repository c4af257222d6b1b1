//! sunshine-core: background weather refresh and notification gatekeeping
//!
//! This library holds everything the `sunshine` CLI does besides argument
//! parsing and rendering.
//!
//! # Main Entry Points
//!
//! - [`sync`] - Run one refresh, cache it, and notify
//! - [`notify`] - Decide whether to notify, and dispatch
//! - [`fetch`] - Retrieve the forecast
//! - [`cache`] - Persisted forecast
//! - [`prefs`] - User preferences and notification state

pub mod cache;
pub mod clock;
pub mod errors;
pub mod fetch;
pub mod foreground;
pub mod logging;
pub mod notify;
pub mod prefs;
pub mod sync;
pub mod weather;

pub use cache::{CacheError, CachedForecast, CurrentConditions, ForecastCache};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::SunshineError;
pub use fetch::{CurrentWeatherFetcher, FetchError, OpenWeatherFetcher, WeatherFetcher};
pub use foreground::{AppVisibility, ForegroundTracker};
pub use notify::{
    DesktopNotifier, NotificationGatekeeper, NotifyDecision, NotifyError, Notifier, SkipReason,
};
pub use prefs::{
    Breadcrumbs, JsonPreferenceStore, MemoryPreferenceStore, NotificationState, PreferenceStore,
    PrefsError, UserPreferences,
};
pub use sync::{
    CurrentRefresh, CurrentWeatherRefresh, RefreshOutcome, RefreshTask, RetryPolicy, SyncContext,
    SyncError, SyncJob, SyncPlanner, SyncReport, SyncSchedule,
};
pub use weather::{Forecast, Units, WeatherEntry};

pub use sunshine_config::{ConfigError, SunshineConfig};

// Re-export logging initialization
pub use logging::init_logging;
