//! Production wiring for a sync run.

use sunshine_config::SunshineConfig;
use sunshine_paths::SunshinePaths;

use super::current::CurrentWeatherRefresh;
use super::errors::SyncError;
use super::job::SyncJob;
use super::schedule::{RetryPolicy, SyncPlanner, SyncSchedule};
use super::task::RefreshTask;
use crate::cache::ForecastCache;
use crate::clock::SystemClock;
use crate::fetch::OpenWeatherFetcher;
use crate::foreground::ForegroundTracker;
use crate::notify::{DesktopNotifier, NotificationGatekeeper};
use crate::prefs::{Breadcrumbs, JsonPreferenceStore};

/// Owns every capability a background sync needs.
///
/// Background syncs never show a screen, so `visibility` stays at zero
/// unless the caller marks a screen shown.
pub struct SyncContext {
    pub config: SunshineConfig,
    pub store: JsonPreferenceStore,
    pub cache: ForecastCache,
    pub fetcher: OpenWeatherFetcher,
    pub notifier: DesktopNotifier,
    pub clock: SystemClock,
    pub visibility: ForegroundTracker,
}

impl SyncContext {
    pub fn open(paths: &SunshinePaths, config: SunshineConfig) -> Result<Self, SyncError> {
        let store = JsonPreferenceStore::open(&paths.preferences_file())?;
        let fetcher = OpenWeatherFetcher::new(&config)?;
        Ok(Self {
            store,
            cache: ForecastCache::new(paths.forecast_cache()),
            fetcher,
            notifier: DesktopNotifier::detect(),
            clock: SystemClock,
            visibility: ForegroundTracker::new(),
            config,
        })
    }

    fn breadcrumbs(&self) -> Breadcrumbs<'_> {
        Breadcrumbs::new(&self.store, self.config.debug.breadcrumbs())
    }

    pub fn gatekeeper(&self) -> NotificationGatekeeper<'_> {
        NotificationGatekeeper::new(
            &self.store,
            &self.notifier,
            &self.clock,
            &self.visibility,
            &self.config.notifications,
        )
        .with_breadcrumbs(self.breadcrumbs())
    }

    pub fn job(&self) -> SyncJob<'_> {
        SyncJob::new(
            RefreshTask::new(&self.fetcher, self.breadcrumbs()),
            self.gatekeeper(),
            &self.cache,
            &self.store,
            &self.clock,
        )
    }

    pub fn current_refresh(&self) -> CurrentWeatherRefresh<'_> {
        CurrentWeatherRefresh::new(&self.fetcher, &self.cache, &self.clock)
    }

    pub fn schedule(&self) -> SyncSchedule {
        SyncSchedule::from_config(&self.config.sync)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_config(&self.config.sync)
    }

    pub fn planner(&self) -> SyncPlanner {
        SyncPlanner::new(self.schedule(), self.retry_policy())
    }
}
