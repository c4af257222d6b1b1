//! The production [`Notifier`]: channels tracked in-process, dispatch via the
//! platform backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use tracing::{debug, info};

use super::errors::NotifyError;
use super::payload::{ChannelSpec, NotificationPayload};
use super::registry;
use super::traits::{NotificationBackend, Notifier};

pub struct DesktopNotifier {
    backend: Option<&'static dyn NotificationBackend>,
    channels: Mutex<BTreeMap<String, ChannelSpec>>,
}

impl DesktopNotifier {
    /// Use whichever backend the registry detects on this system.
    pub fn detect() -> Self {
        Self::with_backend(registry::detect_backend())
    }

    pub fn with_backend(backend: Option<&'static dyn NotificationBackend>) -> Self {
        Self {
            backend,
            channels: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.map(|b| b.name())
    }

    fn has_channel(&self, id: &str) -> bool {
        self.channels
            .lock()
            .map(|channels| channels.contains_key(id))
            .unwrap_or(false)
    }
}

impl Notifier for DesktopNotifier {
    fn ensure_channel(&self, channel: &ChannelSpec) -> Result<(), NotifyError> {
        let mut channels = self.channels.lock().map_err(|_| NotifyError::SendFailed {
            message: "channel registry lock poisoned".to_string(),
        })?;
        if channels.contains_key(&channel.id) {
            return Ok(());
        }
        channels.insert(channel.id.clone(), channel.clone());
        debug!(
            event = "core.notify.channel_created",
            channel_id = %channel.id,
            channel_name = %channel.name,
        );
        Ok(())
    }

    fn dispatch(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        if !self.has_channel(&payload.channel_id) {
            return Err(NotifyError::ChannelMissing {
                channel_id: payload.channel_id.clone(),
            });
        }
        let backend = self.backend.ok_or(NotifyError::NoBackend)?;

        info!(
            event = "core.notify.send_started",
            backend = backend.name(),
            title = %payload.title,
        );
        backend.send(payload)?;
        info!(event = "core.notify.send_completed", backend = backend.name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::payload::{Importance, TapAction};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingBackend {
        sent: AtomicUsize,
    }

    impl NotificationBackend for CountingBackend {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn send(&self, _payload: &NotificationPayload) -> Result<(), NotifyError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn channel() -> ChannelSpec {
        ChannelSpec {
            id: "weather".to_string(),
            name: "Weather updates".to_string(),
            importance: Importance::Default,
        }
    }

    fn payload() -> NotificationPayload {
        NotificationPayload {
            id: 1,
            channel_id: "weather".to_string(),
            small_icon: "weather-clear",
            large_icon: None,
            title: "21°C".to_string(),
            body: "Clear Sky".to_string(),
            auto_dismiss: Duration::from_secs(60),
            auto_cancel: true,
            tap_action: TapAction::OpenMainScreen {
                with_back_stack: true,
            },
        }
    }

    fn leaked_backend() -> &'static CountingBackend {
        Box::leak(Box::new(CountingBackend {
            sent: AtomicUsize::new(0),
        }))
    }

    #[test]
    fn test_dispatch_requires_channel() {
        let backend = leaked_backend();
        let notifier = DesktopNotifier::with_backend(Some(backend));

        let err = notifier.dispatch(&payload()).unwrap_err();
        assert!(matches!(err, NotifyError::ChannelMissing { .. }));
        assert_eq!(backend.sent.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ensure_channel_is_idempotent_then_dispatches() {
        let backend = leaked_backend();
        let notifier = DesktopNotifier::with_backend(Some(backend));

        notifier.ensure_channel(&channel()).unwrap();
        notifier.ensure_channel(&channel()).unwrap();
        assert_eq!(notifier.channels.lock().unwrap().len(), 1);

        notifier.dispatch(&payload()).unwrap();
        assert_eq!(backend.sent.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.backend_name(), Some("counting"));
    }

    #[test]
    fn test_no_backend_is_an_error() {
        let notifier = DesktopNotifier::with_backend(None);
        notifier.ensure_channel(&channel()).unwrap();
        let err = notifier.dispatch(&payload()).unwrap_err();
        assert!(matches!(err, NotifyError::NoBackend));
    }
}
