//! Preference keys. Shared by the core and the CLI so both agree on the file layout.

pub const ENABLE_NOTIFICATIONS: &str = "enable_notifications";
pub const UNITS_METRIC: &str = "units_metric";
pub const LAST_NOTIFICATION: &str = "last_notification";
/// Epoch millis of the last successful fetch.
pub const LAST_SYNC: &str = "last_sync";
pub const SYNC_BREADCRUMBS: &str = "sync_breadcrumbs";
