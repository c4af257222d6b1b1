use super::errors::NotifyError;
use super::payload::{ChannelSpec, NotificationPayload};

/// The notification service the gatekeeper dispatches through.
pub trait Notifier: Send + Sync {
    /// Create the channel if it does not exist yet. Calling it again is a no-op.
    fn ensure_channel(&self, channel: &ChannelSpec) -> Result<(), NotifyError>;

    /// Show `payload`, replacing any shown notification with the same id.
    fn dispatch(&self, payload: &NotificationPayload) -> Result<(), NotifyError>;
}

/// A platform mechanism for putting a notification on screen.
///
/// Each supported platform (libnotify, macOS Notification Center)
/// implements this trait; the registry picks the first available one.
pub trait NotificationBackend: Send + Sync {
    /// The canonical name of this backend (e.g., "linux", "macos").
    fn name(&self) -> &'static str;

    /// Whether this backend can be used on the current system.
    fn is_available(&self) -> bool;

    /// Send a notification.
    fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError>;
}
