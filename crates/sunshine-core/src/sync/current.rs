//! Refresh of the observed current conditions.
//!
//! Runs in the foreground when the forecast is shown, separately from the
//! background forecast refresh. Never notifies.

use tracing::{debug, info, warn};

use crate::cache::ForecastCache;
use crate::clock::Clock;
use crate::fetch::{CurrentWeatherFetcher, FetchError};
use crate::weather::WeatherEntry;

#[derive(Debug)]
pub enum CurrentRefresh {
    /// The cached conditions are recent enough; nothing was fetched.
    Fresh,
    Fetched(WeatherEntry),
    Failed(FetchError),
}

pub struct CurrentWeatherRefresh<'a> {
    fetcher: &'a dyn CurrentWeatherFetcher,
    cache: &'a ForecastCache,
    clock: &'a dyn Clock,
}

impl<'a> CurrentWeatherRefresh<'a> {
    pub fn new(
        fetcher: &'a dyn CurrentWeatherFetcher,
        cache: &'a ForecastCache,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            fetcher,
            cache,
            clock,
        }
    }

    /// Fetch the current conditions when the cached ones are stale, or always
    /// when `force` is set. A cache that cannot be read counts as stale.
    pub fn run(&self, force: bool) -> CurrentRefresh {
        let now = self.clock.now().to_utc();

        if !force {
            match self.cache.current_fetch_needed(now) {
                Ok(false) => return CurrentRefresh::Fresh,
                Ok(true) => {}
                Err(e) => warn!(event = "core.current.cache_check_failed", error = %e),
            }
        }

        match self.fetcher.fetch_current() {
            Ok(entry) => {
                if let Err(e) = self.cache.store_current(entry.clone(), now) {
                    warn!(event = "core.current.store_failed", error = %e);
                }
                info!(
                    event = "core.current.refresh_completed",
                    condition_id = entry.condition_id,
                );
                CurrentRefresh::Fetched(entry)
            }
            Err(e) => {
                if e.is_retryable() {
                    warn!(event = "core.current.refresh_failed", error = %e);
                } else {
                    debug!(event = "core.current.refresh_skipped", error = %e);
                }
                CurrentRefresh::Failed(e)
            }
        }
    }
}
