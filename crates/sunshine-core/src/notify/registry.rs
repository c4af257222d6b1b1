//! Notification registry for looking up the platform backend.

use std::sync::LazyLock;

use tracing::debug;

use super::backends::{LinuxNotificationBackend, MacOsNotificationBackend};
use super::traits::NotificationBackend;

/// Global registry of all supported notification backends.
static REGISTRY: LazyLock<NotificationRegistry> = LazyLock::new(NotificationRegistry::new);

struct NotificationRegistry {
    backends: Vec<Box<dyn NotificationBackend>>,
}

impl NotificationRegistry {
    fn new() -> Self {
        Self {
            backends: vec![
                Box::new(MacOsNotificationBackend),
                Box::new(LinuxNotificationBackend),
            ],
        }
    }

    /// First backend, in registration order, that reports itself available.
    fn detect(&self) -> Option<&dyn NotificationBackend> {
        self.backends
            .iter()
            .find(|b| b.is_available())
            .map(|b| b.as_ref())
    }
}

/// Detect the notification backend for this system, if any.
pub fn detect_backend() -> Option<&'static dyn NotificationBackend> {
    let backend = REGISTRY.detect();
    debug!(
        event = "core.notify.backend_detected",
        backend = backend.map(|b| b.name()).unwrap_or("none"),
    );
    backend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_expected_backends() {
        let registry = NotificationRegistry::new();
        let names: Vec<&str> = registry.backends.iter().map(|b| b.name()).collect();
        assert_eq!(names, ["macos", "linux"]);
    }

    #[test]
    fn detect_backend_does_not_panic() {
        let _backend = detect_backend();
    }
}
