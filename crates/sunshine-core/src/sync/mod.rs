//! Background refresh.
//!
//! [`RefreshTask`] performs one fetch and reports a [`RefreshOutcome`];
//! [`SyncJob`] adds caching and the notification step on top. When to run
//! again is up to the caller, guided by [`SyncSchedule`] and [`RetryPolicy`]
//! or, for a long-running loop, [`SyncPlanner`]. [`CurrentWeatherRefresh`]
//! keeps the observed current conditions up to date for display.

pub mod context;
pub mod current;
pub mod errors;
pub mod job;
pub mod outcome;
pub mod schedule;
pub mod task;

pub use context::SyncContext;
pub use current::{CurrentRefresh, CurrentWeatherRefresh};
pub use errors::SyncError;
pub use job::{SyncJob, SyncReport, last_sync};
pub use outcome::RefreshOutcome;
pub use schedule::{RetryPolicy, SyncPlanner, SyncSchedule};
pub use task::{RefreshAttempt, RefreshTask};
