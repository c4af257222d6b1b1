//! Key-value preference storage.
//!
//! Holds the user's preference flags, the persisted notification state, and
//! the debug breadcrumb trail. Reads never fail: a missing or mistyped value
//! yields the caller's default.

pub mod breadcrumbs;
pub mod errors;
pub mod keys;
pub mod store;

pub use breadcrumbs::Breadcrumbs;
pub use errors::PrefsError;
pub use store::{JsonPreferenceStore, MemoryPreferenceStore};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::weather::Units;

pub trait PreferenceStore: Send + Sync {
    fn get_bool(&self, key: &str, default: bool) -> bool;

    fn get_i64(&self, key: &str, default: i64) -> i64;

    fn get_string(&self, key: &str, default: &str) -> String;

    fn put(&self, key: &str, value: Value) -> Result<(), PrefsError>;

    fn remove(&self, key: &str) -> Result<(), PrefsError>;

    fn put_bool(&self, key: &str, value: bool) -> Result<(), PrefsError> {
        self.put(key, Value::Bool(value))
    }

    fn put_i64(&self, key: &str, value: i64) -> Result<(), PrefsError> {
        self.put(key, Value::from(value))
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.put(key, Value::String(value.to_string()))
    }
}

/// The user-facing preference flags, read once per decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserPreferences {
    pub notifications_enabled: bool,
    pub units: Units,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            units: Units::Metric,
        }
    }
}

impl UserPreferences {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();
        Self {
            notifications_enabled: store
                .get_bool(keys::ENABLE_NOTIFICATIONS, defaults.notifications_enabled),
            units: Units::from_metric_flag(
                store.get_bool(keys::UNITS_METRIC, defaults.units.is_metric()),
            ),
        }
    }
}

/// Persisted "when did we last notify" marker, epoch milliseconds.
///
/// `0` means never. The stored value only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationState {
    pub last_notification_ms: i64,
}

impl NotificationState {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        Self {
            last_notification_ms: store.get_i64(keys::LAST_NOTIFICATION, 0),
        }
    }

    pub fn last_notification(&self) -> Option<DateTime<Utc>> {
        if self.last_notification_ms <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.last_notification_ms)
    }

    /// Record a dispatch at `at`. Never writes a value older than the one
    /// already stored.
    pub fn record(store: &dyn PreferenceStore, at: DateTime<Utc>) -> Result<Self, PrefsError> {
        let current = Self::load(store);
        let at_ms = at.timestamp_millis();
        if at_ms <= current.last_notification_ms {
            return Ok(current);
        }
        store.put_i64(keys::LAST_NOTIFICATION, at_ms)?;
        Ok(Self {
            last_notification_ms: at_ms,
        })
    }
}
