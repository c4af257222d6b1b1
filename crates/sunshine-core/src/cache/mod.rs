//! Forecast cache.
//!
//! Stores the most recent forecast, plus the last observed current
//! conditions, in `~/.sunshine/forecast.json` so the CLI can show them
//! offline and decide whether a fetch is needed at all.

pub mod errors;

pub use errors::CacheError;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::weather::{Forecast, WeatherEntry};

/// Days of forecast the fetch endpoint returns.
pub const NUM_DAYS: usize = 5;
/// Forecast entries per day (3-hour steps).
pub const ENTRIES_PER_DAY: usize = 24 / 3;
/// Below this many future entries the cache is considered stale.
pub const MIN_FUTURE_ENTRIES: usize = (NUM_DAYS - 1) * ENTRIES_PER_DAY;

/// Observed conditions older than this are refetched.
pub const CURRENT_MAX_AGE_MINUTES: i64 = 10;
/// A daily summary entry must lie within this many minutes of local noon.
const MIDDAY_TOLERANCE_MINUTES: i64 = 90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub fetched_at: DateTime<Utc>,
    pub entry: WeatherEntry,
}

impl CurrentConditions {
    /// Fetched within the last [`CURRENT_MAX_AGE_MINUTES`], and not in the future.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let age = now - self.fetched_at;
        age >= Duration::zero() && age < Duration::minutes(CURRENT_MAX_AGE_MINUTES)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedForecast {
    pub fetched_at: Option<DateTime<Utc>>,
    pub entries: Vec<WeatherEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentConditions>,
}

impl CachedForecast {
    /// Entries at or after `now`, in time order.
    pub fn upcoming(&self, now: DateTime<Utc>) -> impl Iterator<Item = &WeatherEntry> {
        self.entries.iter().filter(move |e| e.timestamp >= now)
    }

    /// The entry covering `now`: the latest one not after `now`, else the first upcoming.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&WeatherEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.timestamp <= now)
            .or_else(|| self.entries.first())
    }

    /// Observed conditions, if fresh at `now`.
    pub fn fresh_current(&self, now: DateTime<Utc>) -> Option<&WeatherEntry> {
        self.current
            .as_ref()
            .filter(|c| c.is_fresh(now))
            .map(|c| &c.entry)
    }

    /// One entry per day from tomorrow on: the one closest to local noon.
    ///
    /// Days are calendar days at `offset`. A day with no entry within
    /// 90 minutes of noon is left out.
    pub fn midday(&self, now: DateTime<Utc>, offset: FixedOffset) -> Vec<&WeatherEntry> {
        let today = now.with_timezone(&offset).date_naive();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();

        let mut by_day: BTreeMap<NaiveDate, (Duration, &WeatherEntry)> = BTreeMap::new();
        for entry in &self.entries {
            let local = entry.timestamp.with_timezone(&offset).naive_local();
            let day = local.date();
            if day <= today {
                continue;
            }
            let distance = (local - day.and_time(noon)).abs();
            if distance > Duration::minutes(MIDDAY_TOLERANCE_MINUTES) {
                continue;
            }
            by_day
                .entry(day)
                .and_modify(|best| {
                    if distance < best.0 {
                        *best = (distance, entry);
                    }
                })
                .or_insert((distance, entry));
        }
        by_day.into_values().map(|(_, entry)| entry).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ForecastCache {
    path: PathBuf,
}

impl ForecastCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cache. Missing or corrupt files read as empty.
    pub fn load(&self) -> Result<CachedForecast, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(CachedForecast::default());
            }
            Err(source) => {
                return Err(CacheError::ReadFailed {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        match serde_json::from_str(&content) {
            Ok(cached) => Ok(cached),
            Err(e) => {
                warn!(
                    event = "core.cache.parse_failed",
                    file_path = %self.path.display(),
                    error = %e,
                    "Forecast cache is corrupted - treating as empty"
                );
                Ok(CachedForecast::default())
            }
        }
    }

    /// Merge a freshly fetched forecast into the cache.
    ///
    /// Entries older than one hour before `now` are dropped; entries with the
    /// same timestamp are replaced by the new fetch.
    pub fn store(&self, forecast: &Forecast, now: DateTime<Utc>) -> Result<usize, CacheError> {
        let existing = self.load()?;
        let cutoff = now - Duration::hours(1);

        let mut by_time: BTreeMap<DateTime<Utc>, WeatherEntry> = existing
            .entries
            .into_iter()
            .map(|e| (e.timestamp, e))
            .collect();
        let before = by_time.len();
        by_time.retain(|ts, _| *ts >= cutoff);
        let dropped = before - by_time.len();

        for entry in &forecast.entries {
            by_time.insert(entry.timestamp, entry.clone());
        }
        by_time.retain(|ts, _| *ts >= cutoff);

        let cached = CachedForecast {
            fetched_at: Some(now),
            entries: by_time.into_values().collect(),
            current: existing.current,
        };
        self.write(&cached)?;

        debug!(
            event = "core.cache.stored",
            entries = cached.entries.len(),
            dropped_old = dropped,
        );
        Ok(cached.entries.len())
    }

    /// Replace the observed current conditions, keeping the forecast.
    pub fn store_current(&self, entry: WeatherEntry, now: DateTime<Utc>) -> Result<(), CacheError> {
        let mut cached = self.load()?;
        cached.current = Some(CurrentConditions {
            fetched_at: now,
            entry,
        });
        self.write(&cached)?;
        debug!(event = "core.cache.current_stored");
        Ok(())
    }

    /// Whether the observed conditions are missing or older than ten minutes.
    pub fn current_fetch_needed(&self, now: DateTime<Utc>) -> Result<bool, CacheError> {
        Ok(self.load()?.fresh_current(now).is_none())
    }

    /// Whether the cache holds too few future entries to cover the forecast window.
    pub fn fetch_needed(&self, now: DateTime<Utc>) -> Result<bool, CacheError> {
        let cached = self.load()?;
        Ok(cached.upcoming(now).count() < MIN_FUTURE_ENTRIES)
    }

    fn write(&self, cached: &CachedForecast) -> Result<(), CacheError> {
        let write_err = |source: std::io::Error| CacheError::WriteFailed {
            path: self.path.display().to_string(),
            source,
        };
        let content =
            serde_json::to_string_pretty(cached).map_err(|e| CacheError::SerializeFailed {
                message: e.to_string(),
            })?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(write_err)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::entry::sample_entry;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn cache_in(dir: &tempfile::TempDir) -> ForecastCache {
        ForecastCache::new(dir.path().join("forecast.json"))
    }

    #[test]
    fn test_missing_cache_is_empty_and_needs_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        assert_eq!(cache.load().unwrap(), CachedForecast::default());
        assert!(cache.fetch_needed(at(12)).unwrap());
    }

    #[test]
    fn test_store_drops_entries_older_than_an_hour() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache
            .store(&Forecast::new(vec![sample_entry(at(6)), sample_entry(at(9))]), at(6))
            .unwrap();

        let count = cache
            .store(&Forecast::new(vec![sample_entry(at(12))]), at(10))
            .unwrap();

        let cached = cache.load().unwrap();
        assert_eq!(count, 2);
        assert_eq!(cached.entries[0].timestamp, at(9));
        assert_eq!(cached.entries[1].timestamp, at(12));
        assert_eq!(cached.fetched_at, Some(at(10)));
    }

    #[test]
    fn test_store_replaces_same_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.store(&Forecast::new(vec![sample_entry(at(12))]), at(10)).unwrap();

        let mut newer = sample_entry(at(12));
        newer.temperature = 30.0;
        cache.store(&Forecast::new(vec![newer]), at(11)).unwrap();

        let cached = cache.load().unwrap();
        assert_eq!(cached.entries.len(), 1);
        assert_eq!(cached.entries[0].temperature, 30.0);
    }

    #[test]
    fn test_fetch_not_needed_with_full_window() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let start = at(0);
        let entries: Vec<_> = (0..40)
            .map(|i| sample_entry(start + Duration::hours(3 * i)))
            .collect();
        cache.store(&Forecast::new(entries), start).unwrap();

        assert!(!cache.fetch_needed(start).unwrap());
        // Three days later only 16 future entries remain.
        assert!(cache.fetch_needed(start + Duration::days(3)).unwrap());
    }

    #[test]
    fn test_corrupt_cache_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        fs::write(cache.path(), "[1, 2").unwrap();
        assert!(cache.load().unwrap().entries.is_empty());
    }

    #[test]
    fn test_current_entry() {
        let cached = CachedForecast {
            fetched_at: None,
            entries: vec![sample_entry(at(9)), sample_entry(at(12)), sample_entry(at(15))],
            current: None,
        };
        assert_eq!(cached.current(at(13)).unwrap().timestamp, at(12));
        assert_eq!(cached.current(at(3)).unwrap().timestamp, at(9));
        assert_eq!(cached.upcoming(at(13)).count(), 1);
    }

    #[test]
    fn test_current_conditions_expire_after_ten_minutes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let now = at(12);
        assert!(cache.current_fetch_needed(now).unwrap());

        cache.store_current(sample_entry(now), now).unwrap();

        assert!(!cache.current_fetch_needed(now + Duration::minutes(9)).unwrap());
        assert!(cache.current_fetch_needed(now + Duration::minutes(10)).unwrap());
        // Fetched "in the future" after a clock change: not trusted.
        assert!(cache.current_fetch_needed(now - Duration::minutes(1)).unwrap());
    }

    #[test]
    fn test_forecast_store_keeps_current_conditions() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        cache.store_current(sample_entry(at(12)), at(12)).unwrap();
        cache.store(&Forecast::new(vec![sample_entry(at(15))]), at(12)).unwrap();

        let cached = cache.load().unwrap();
        assert_eq!(cached.entries.len(), 1);
        assert_eq!(cached.fresh_current(at(12)).map(|e| e.timestamp), Some(at(12)));
    }

    #[test]
    fn test_midday_picks_entry_nearest_local_noon_from_tomorrow() {
        let start = at(0);
        let entries: Vec<_> = (0..24)
            .map(|i| sample_entry(start + Duration::hours(3 * i)))
            .collect();
        let cached = CachedForecast {
            fetched_at: Some(start),
            entries,
            current: None,
        };

        let utc = FixedOffset::east_opt(0).unwrap();
        let days: Vec<_> = cached.midday(at(8), utc).iter().map(|e| e.timestamp).collect();
        assert_eq!(
            days,
            vec![
                Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap(),
            ]
        );

        // At UTC+2, local noon falls between the 09:00 and 12:00 UTC steps.
        let eet = FixedOffset::east_opt(2 * 3600).unwrap();
        let days: Vec<_> = cached.midday(at(8), eet).iter().map(|e| e.timestamp).collect();
        assert_eq!(
            days,
            vec![
                Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_midday_skips_days_without_an_entry_near_noon() {
        let cached = CachedForecast {
            fetched_at: None,
            entries: vec![
                sample_entry(Utc.with_ymd_and_hms(2024, 5, 2, 3, 0, 0).unwrap()),
                sample_entry(Utc.with_ymd_and_hms(2024, 5, 3, 13, 0, 0).unwrap()),
            ],
            current: None,
        };
        let utc = FixedOffset::east_opt(0).unwrap();
        let days = cached.midday(at(12), utc);
        assert_eq!(days.len(), 1);
        assert_eq!(
            days[0].timestamp,
            Utc.with_ymd_and_hms(2024, 5, 3, 13, 0, 0).unwrap()
        );
    }
}
