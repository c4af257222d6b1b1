//! Linux notification backend using notify-send (libnotify).

use crate::notify::errors::NotifyError;
use crate::notify::payload::NotificationPayload;
use crate::notify::traits::NotificationBackend;

const APP_NAME: &str = "Sunshine";

/// Stacking tag understood by most notification daemons; a notification with
/// the same tag replaces the previous one.
const STACK_HINT: &str = "x-canonical-private-synchronous";

/// Linux notification backend via `notify-send` (libnotify).
pub struct LinuxNotificationBackend;

impl NotificationBackend for LinuxNotificationBackend {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn is_available(&self) -> bool {
        cfg!(target_os = "linux") && which::which("notify-send").is_ok()
    }

    fn send(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        let output = std::process::Command::new("notify-send")
            .args(notify_send_args(payload))
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => NotifyError::ToolNotFound {
                    tool: "notify-send".to_string(),
                },
                _ => NotifyError::SendFailed {
                    message: format!("notify-send exec failed: {}", e),
                },
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(NotifyError::SendFailed {
                message: format!("notify-send exit {}: {}", output.status, stderr.trim()),
            })
        }
    }
}

fn notify_send_args(payload: &NotificationPayload) -> Vec<String> {
    let icon = match &payload.large_icon {
        Some(path) => path.display().to_string(),
        None => payload.small_icon.to_string(),
    };
    vec![
        format!("--app-name={}", APP_NAME),
        format!("--icon={}", icon),
        format!("--expire-time={}", payload.auto_dismiss_ms()),
        format!("--category={}", payload.channel_id),
        format!("--hint=string:{}:sunshine-{}", STACK_HINT, payload.id),
        payload.title.clone(),
        payload.body.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::payload::TapAction;
    use std::path::PathBuf;
    use std::time::Duration;

    fn payload() -> NotificationPayload {
        NotificationPayload {
            id: 1,
            channel_id: "weather".to_string(),
            small_icon: "weather-clear",
            large_icon: None,
            title: "21°C".to_string(),
            body: "Clear Sky".to_string(),
            auto_dismiss: Duration::from_secs(3 * 60 * 60),
            auto_cancel: true,
            tap_action: TapAction::OpenMainScreen {
                with_back_stack: true,
            },
        }
    }

    #[test]
    fn linux_backend_name() {
        let backend = LinuxNotificationBackend;
        assert_eq!(backend.name(), "linux");
    }

    #[test]
    fn linux_backend_availability_matches_platform() {
        let backend = LinuxNotificationBackend;
        if !cfg!(target_os = "linux") {
            assert!(!backend.is_available());
        }
    }

    #[test]
    fn args_carry_expiry_icon_and_replace_tag() {
        let args = notify_send_args(&payload());
        assert!(args.contains(&"--icon=weather-clear".to_string()));
        assert!(args.contains(&"--expire-time=10800000".to_string()));
        assert!(
            args.contains(&"--hint=string:x-canonical-private-synchronous:sunshine-1".to_string())
        );
        assert_eq!(&args[args.len() - 2..], ["21°C", "Clear Sky"]);
    }

    #[test]
    fn large_icon_wins_over_themed_icon() {
        let mut payload = payload();
        payload.large_icon = Some(PathBuf::from("/tmp/city.png"));
        let args = notify_send_args(&payload);
        assert!(args.contains(&"--icon=/tmp/city.png".to_string()));
    }
}
