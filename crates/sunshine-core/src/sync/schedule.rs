//! When the next sync should run.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use sunshine_config::SyncConfig;

use super::outcome::RefreshOutcome;

const SECS_PER_HOUR: u64 = 60 * 60;

/// Periodic sync window: due `interval` after the last run, and expected to
/// have run within a further `flex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSchedule {
    interval: Duration,
    flex: Duration,
}

impl SyncSchedule {
    pub fn new(interval: Duration, flex: Duration) -> Self {
        Self { interval, flex }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            Duration::from_secs(config.interval_hours().saturating_mul(SECS_PER_HOUR)),
            Duration::from_secs(config.flex_hours().saturating_mul(SECS_PER_HOUR)),
        )
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn flex(&self) -> Duration {
        self.flex
    }

    /// The `(earliest, latest)` window for the run after `last`.
    pub fn window_after(&self, last: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let earliest = add(last, self.interval);
        (earliest, add(earliest, self.flex))
    }

    /// A sync is due when none ever ran or the interval since the last has passed.
    pub fn is_due(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last {
            None => true,
            Some(last) => now >= self.window_after(last).0,
        }
    }

    /// Past the end of the flex window: the scheduler missed a run.
    pub fn is_overdue(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        last.is_some_and(|last| now > self.window_after(last).1)
    }

    /// How long to wait from `now` until the next run is due.
    pub fn wait_from(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
        let Some(last) = last else {
            return Duration::ZERO;
        };
        let (earliest, _) = self.window_after(last);
        (earliest - now).to_std().unwrap_or(Duration::ZERO)
    }
}

fn add(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(by)
        .ok()
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Exponential backoff for retryable failures: `base * 2^attempt`, capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    base: Duration,
    max: Duration,
}

impl RetryPolicy {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self { base, max }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            Duration::from_secs(config.retry_base_secs()),
            Duration::from_secs(config.retry_max_secs()),
        )
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base
            .checked_mul(factor)
            .map_or(self.max, |delay| delay.min(self.max))
    }
}

/// Decides the waits of a long-running sync loop.
#[derive(Debug, Clone)]
pub struct SyncPlanner {
    schedule: SyncSchedule,
    retry: RetryPolicy,
    failures: u32,
}

impl SyncPlanner {
    pub fn new(schedule: SyncSchedule, retry: RetryPolicy) -> Self {
        Self {
            schedule,
            retry,
            failures: 0,
        }
    }

    /// Consecutive retryable failures since the last success.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Wait before the first run, counted from the last successful sync.
    pub fn initial_wait(&self, last_sync: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
        self.schedule.wait_from(last_sync, now)
    }

    /// Wait after a run that ended with `outcome`. `None` means stop.
    pub fn next_wait(&mut self, outcome: RefreshOutcome) -> Option<Duration> {
        match outcome {
            RefreshOutcome::Success => {
                self.failures = 0;
                Some(self.schedule.interval())
            }
            RefreshOutcome::RetryableFailure => {
                let delay = self.retry.delay_for(self.failures);
                self.failures = self.failures.saturating_add(1);
                Some(delay)
            }
            RefreshOutcome::FatalFailure => None,
        }
    }
}
