//! The sync job: refresh, cache, then hand the newest entry to the gatekeeper.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::outcome::RefreshOutcome;
use super::task::RefreshTask;
use crate::cache::ForecastCache;
use crate::clock::Clock;
use crate::notify::{NotificationGatekeeper, NotifyDecision};
use crate::prefs::PreferenceStore;
use crate::prefs::keys::LAST_SYNC;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub outcome: RefreshOutcome,
    /// `None` unless the refresh succeeded with at least one entry.
    pub decision: Option<NotifyDecision>,
    pub entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct SyncJob<'a> {
    task: RefreshTask<'a>,
    gatekeeper: NotificationGatekeeper<'a>,
    cache: &'a ForecastCache,
    store: &'a dyn PreferenceStore,
    clock: &'a dyn Clock,
}

impl<'a> SyncJob<'a> {
    pub fn new(
        task: RefreshTask<'a>,
        gatekeeper: NotificationGatekeeper<'a>,
        cache: &'a ForecastCache,
        store: &'a dyn PreferenceStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            task,
            gatekeeper,
            cache,
            store,
            clock,
        }
    }

    /// Run one sync. Never fails: problems end up in the report or the log.
    pub fn run(&self) -> SyncReport {
        let attempt = self.task.attempt();

        let Some(forecast) = attempt.forecast else {
            return SyncReport {
                outcome: attempt.outcome,
                decision: None,
                entries: 0,
                error: attempt.error,
            };
        };

        let now = self.clock.now().to_utc();
        if let Err(e) = self.cache.store(&forecast, now) {
            warn!(event = "core.sync.cache_store_failed", error = %e);
        }
        if let Err(e) = self.store.put_i64(LAST_SYNC, now.timestamp_millis()) {
            warn!(event = "core.sync.last_sync_persist_failed", error = %e);
        }

        let decision = forecast
            .first()
            .map(|entry| self.gatekeeper.notify_if_needed(entry));

        info!(
            event = "core.sync.job_completed",
            entries = forecast.len(),
            notified = decision.is_some_and(|d| d.is_dispatched()),
        );

        SyncReport {
            outcome: attempt.outcome,
            decision,
            entries: forecast.len(),
            error: None,
        }
    }
}

/// When the last successful sync happened, if ever.
pub fn last_sync(store: &dyn PreferenceStore) -> Option<DateTime<Utc>> {
    match store.get_i64(LAST_SYNC, 0) {
        ms if ms > 0 => DateTime::from_timestamp_millis(ms),
        _ => None,
    }
}
