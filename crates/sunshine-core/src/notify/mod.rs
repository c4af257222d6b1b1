//! Weather notifications.
//!
//! The [`NotificationGatekeeper`] decides whether a fetched entry is shown;
//! delivery goes through the [`Notifier`] capability. [`DesktopNotifier`]
//! is the production notifier, dispatching via the first available
//! [`NotificationBackend`] in [`registry`].

pub mod backends;
pub mod desktop;
pub mod errors;
pub mod gatekeeper;
pub mod payload;
pub mod registry;
pub mod traits;

pub use desktop::DesktopNotifier;
pub use errors::NotifyError;
pub use gatekeeper::{GateInputs, NotificationGatekeeper, NotifyDecision, SkipReason, evaluate};
pub use payload::{ChannelSpec, NotificationPayload, TapAction, WEATHER_NOTIFICATION_ID, build_payload};
pub use traits::{NotificationBackend, Notifier};
