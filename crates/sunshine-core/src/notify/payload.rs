//! Notification payload construction.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use sunshine_config::NotificationConfig;
use tracing::debug;

use super::errors::NotifyError;
use crate::prefs::UserPreferences;
use crate::weather::{WeatherEntry, WeatherIcon, describe, format_temperature};

/// Every weather notification reuses this id, so a new one replaces the old.
pub const WEATHER_NOTIFICATION_ID: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Default,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSpec {
    pub id: String,
    pub name: String,
    pub importance: Importance,
}

impl ChannelSpec {
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self {
            id: config.channel_id().to_string(),
            name: config.channel_name().to_string(),
            importance: Importance::Default,
        }
    }
}

/// What happens when the user clicks the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TapAction {
    /// Open the forecast overview; back navigation leads to the app's root.
    OpenMainScreen { with_back_stack: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPayload {
    pub id: u32,
    pub channel_id: String,
    /// Freedesktop icon name derived from the condition.
    pub small_icon: &'static str,
    pub large_icon: Option<PathBuf>,
    pub title: String,
    pub body: String,
    pub auto_dismiss: Duration,
    pub auto_cancel: bool,
    pub tap_action: TapAction,
}

impl NotificationPayload {
    pub fn auto_dismiss_ms(&self) -> u128 {
        self.auto_dismiss.as_millis()
    }
}

/// Build the notification for `entry`.
///
/// The title is the unit-aware temperature and the body the condition
/// description. A configured large icon that does not exist is left out.
pub fn build_payload(
    entry: &WeatherEntry,
    prefs: &UserPreferences,
    config: &NotificationConfig,
) -> Result<NotificationPayload, NotifyError> {
    if !entry.temperature.is_finite() {
        return Err(NotifyError::BuildFailed {
            message: format!("temperature is not a number: {}", entry.temperature),
        });
    }

    let large_icon = match config.large_icon() {
        Some(path) if path.is_file() => Some(path.to_path_buf()),
        Some(path) => {
            debug!(
                event = "core.notify.large_icon_missing",
                path = %path.display(),
            );
            None
        }
        None => None,
    };

    let auto_dismiss_secs = config
        .auto_dismiss_hours()
        .checked_mul(60 * 60)
        .ok_or_else(|| NotifyError::BuildFailed {
            message: format!(
                "auto-dismiss of {} hours is out of range",
                config.auto_dismiss_hours()
            ),
        })?;

    Ok(NotificationPayload {
        id: WEATHER_NOTIFICATION_ID,
        channel_id: config.channel_id().to_string(),
        small_icon: WeatherIcon::resolve(&entry.icon_code, entry.condition_id).freedesktop_name(),
        large_icon,
        title: format_temperature(entry.temperature, prefs.units),
        body: describe(entry.condition_id).into_owned(),
        auto_dismiss: Duration::from_secs(auto_dismiss_secs),
        auto_cancel: true,
        tap_action: TapAction::OpenMainScreen {
            with_back_stack: true,
        },
    })
}
