//! macOS notification backend using osascript (Notification Center).

use crate::notify::errors::NotifyError;
use crate::notify::payload::NotificationPayload;
use crate::notify::traits::NotificationBackend;

/// macOS notification backend via `osascript`.
///
/// Notification Center has no per-notification expiry or replace id, so
/// those payload fields are ignored here.
pub struct MacOsNotificationBackend;

impl NotificationBackend for MacOsNotificationBackend {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "macos") && which::which("osascript").is_ok()
    }

    fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let output = std::process::Command::new("osascript")
            .arg("-e")
            .arg(applescript(payload))
            .output()
            .map_err(|e| NotifyError::SendFailed {
                message: format!("osascript exec failed: {}", e),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(NotifyError::SendFailed {
                message: format!("osascript exit {}: {}", output.status, stderr.trim()),
            })
        }
    }
}

fn applescript(payload: &NotificationPayload) -> String {
    format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(&payload.body),
        escape_applescript(&payload.title)
    )
}

fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macos_backend_name() {
        assert_eq!(MacOsNotificationBackend.name(), "macos");
    }

    #[test]
    fn macos_backend_availability_matches_platform() {
        if !cfg!(target_os = "macos") {
            assert!(!MacOsNotificationBackend.is_available());
        }
    }

    #[test]
    fn escape_applescript_quotes_and_backslashes() {
        assert_eq!(escape_applescript(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_applescript(r"a\b"), r"a\\b");
    }
}
