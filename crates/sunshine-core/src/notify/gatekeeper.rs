//! Decides whether freshly fetched weather is worth a notification.
//!
//! A notification fires only when all of these hold, checked in order:
//!
//! 1. the user has notifications enabled;
//! 2. strictly more than `min_interval_minutes` have passed since the last one;
//! 3. no forecast screen is visible;
//! 4. the local hour is strictly greater than `quiet_until_hour`.
//!
//! The first failing check is reported as the [`SkipReason`].

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::Serialize;
use sunshine_config::NotificationConfig;
use tracing::{info, warn};

use super::payload::{ChannelSpec, build_payload};
use super::traits::Notifier;
use crate::clock::Clock;
use crate::foreground::AppVisibility;
use crate::prefs::{Breadcrumbs, NotificationState, PreferenceStore, UserPreferences};
use crate::weather::WeatherEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    Disabled,
    TooSoon { elapsed_minutes: i64 },
    Foreground,
    QuietHours { hour: u32 },
    /// The stored last-notification time lies in the future.
    ClockSkew,
    BuildFailed,
    DispatchFailed,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "notifications are disabled"),
            SkipReason::TooSoon { elapsed_minutes } => {
                write!(f, "last notification was {} min ago", elapsed_minutes)
            }
            SkipReason::Foreground => write!(f, "a forecast screen is open"),
            SkipReason::QuietHours { hour } => write!(f, "quiet hours (local hour {})", hour),
            SkipReason::ClockSkew => write!(f, "last notification time is in the future"),
            SkipReason::BuildFailed => write!(f, "notification could not be built"),
            SkipReason::DispatchFailed => write!(f, "notification could not be dispatched"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum NotifyDecision {
    Dispatched { at: DateTime<Utc> },
    Skipped(SkipReason),
}

impl NotifyDecision {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, NotifyDecision::Dispatched { .. })
    }
}

/// Everything the decision predicate looks at, gathered up front.
#[derive(Debug, Clone, Copy)]
pub struct GateInputs {
    pub prefs: UserPreferences,
    pub state: NotificationState,
    pub now: DateTime<FixedOffset>,
    pub foreground: bool,
}

/// The decision predicate, free of any I/O.
pub fn evaluate(inputs: &GateInputs, config: &NotificationConfig) -> Result<(), SkipReason> {
    if !inputs.prefs.notifications_enabled {
        return Err(SkipReason::Disabled);
    }

    if let Some(last) = inputs.state.last_notification() {
        let elapsed = inputs.now.to_utc() - last;
        if elapsed < chrono::Duration::zero() {
            return Err(SkipReason::ClockSkew);
        }
        let min_minutes = i64::try_from(config.min_interval_minutes()).unwrap_or(i64::MAX);
        if elapsed <= chrono::Duration::try_minutes(min_minutes).unwrap_or(chrono::Duration::MAX) {
            return Err(SkipReason::TooSoon {
                elapsed_minutes: elapsed.num_minutes(),
            });
        }
    }

    if inputs.foreground {
        return Err(SkipReason::Foreground);
    }

    let hour = inputs.now.hour();
    if hour <= config.quiet_until_hour() {
        return Err(SkipReason::QuietHours { hour });
    }

    Ok(())
}

/// Emits at most one weather notification per minimum interval.
///
/// Concurrency: the last-notification timestamp is read, then written after
/// dispatch, without a lock. Two gatekeepers sharing one preference file and
/// running at the same moment can both dispatch. The scheduler runs one sync
/// at a time, which is the only guard against this.
pub struct NotificationGatekeeper<'a> {
    store: &'a dyn PreferenceStore,
    notifier: &'a dyn Notifier,
    clock: &'a dyn Clock,
    visibility: &'a dyn AppVisibility,
    config: &'a NotificationConfig,
    breadcrumbs: Breadcrumbs<'a>,
}

impl<'a> NotificationGatekeeper<'a> {
    pub fn new(
        store: &'a dyn PreferenceStore,
        notifier: &'a dyn Notifier,
        clock: &'a dyn Clock,
        visibility: &'a dyn AppVisibility,
        config: &'a NotificationConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
            visibility,
            config,
            breadcrumbs: Breadcrumbs::disabled(store),
        }
    }

    pub fn with_breadcrumbs(mut self, breadcrumbs: Breadcrumbs<'a>) -> Self {
        self.breadcrumbs = breadcrumbs;
        self
    }

    fn inputs(&self) -> GateInputs {
        GateInputs {
            prefs: UserPreferences::load(self.store),
            state: NotificationState::load(self.store),
            now: self.clock.now(),
            foreground: self.visibility.is_foreground(),
        }
    }

    /// Run the predicate against current state without dispatching.
    pub fn check(&self) -> Result<(), SkipReason> {
        evaluate(&self.inputs(), self.config)
    }

    /// Notify about `entry` if the predicate allows it.
    ///
    /// Build and dispatch errors are logged and reported as a skip; the
    /// timestamp is only persisted after a successful dispatch.
    pub fn notify_if_needed(&self, entry: &WeatherEntry) -> NotifyDecision {
        let inputs = self.inputs();

        if let Err(reason) = evaluate(&inputs, self.config) {
            info!(event = "core.notify.skipped", reason = %reason);
            return NotifyDecision::Skipped(reason);
        }

        let payload = match build_payload(entry, &inputs.prefs, self.config) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(event = "core.notify.build_failed", error = %e);
                return NotifyDecision::Skipped(SkipReason::BuildFailed);
            }
        };

        let channel = ChannelSpec::from_config(self.config);
        if let Err(e) = self
            .notifier
            .ensure_channel(&channel)
            .and_then(|()| self.notifier.dispatch(&payload))
        {
            warn!(
                event = "core.notify.dispatch_failed",
                channel_id = %channel.id,
                error = %e,
            );
            return NotifyDecision::Skipped(SkipReason::DispatchFailed);
        }

        let at = inputs.now.to_utc();
        if let Err(e) = NotificationState::record(self.store, at) {
            warn!(event = "core.notify.state_persist_failed", error = %e);
        }
        self.breadcrumbs.drop_crumb("n");

        info!(
            event = "core.notify.dispatched",
            title = %payload.title,
            body = %payload.body,
        );
        NotifyDecision::Dispatched { at }
    }
}
