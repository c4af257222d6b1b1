//! Configuration types.
//!
//! Every field is optional in the file; accessors supply the built-in
//! defaults so that a partially-written `config.toml` behaves predictably.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_SYNC_INTERVAL_HOURS: u64 = 6;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RETRY_BASE_SECS: u64 = 30;
pub const DEFAULT_RETRY_MAX_SECS: u64 = 5 * 60 * 60;
pub const DEFAULT_MIN_INTERVAL_MINUTES: u64 = 120;
pub const DEFAULT_QUIET_UNTIL_HOUR: u32 = 6;
pub const DEFAULT_AUTO_DISMISS_HOURS: u64 = 3;
pub const DEFAULT_CHANNEL_ID: &str = "weather";
pub const DEFAULT_CHANNEL_NAME: &str = "Weather updates";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SunshineConfig {
    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Where to fetch the forecast for. Coordinates win over the city name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl LocationConfig {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.trim().is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.coordinates().is_some() || self.city().is_some()
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        // Coordinates travel as a pair so a project file cannot mix its lat
        // with the user file's lon. A half pair is carried over as-is for
        // validation to reject.
        let (lat, lon) = if override_config.lat.is_some() || override_config.lon.is_some() {
            (override_config.lat, override_config.lon)
        } else {
            (base.lat, base.lon)
        };
        Self {
            city: override_config.city.clone().or_else(|| base.city.clone()),
            lat,
            lon,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ApiConfig {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            key: override_config.key.clone().or_else(|| base.key.clone()),
            base_url: override_config
                .base_url
                .clone()
                .or_else(|| base.base_url.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_hours: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flex_hours: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_base_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_max_secs: Option<u64>,
}

impl SyncConfig {
    pub fn interval_hours(&self) -> u64 {
        self.interval_hours.unwrap_or(DEFAULT_SYNC_INTERVAL_HOURS)
    }

    /// Flex window on top of the interval. Defaults to a third of the interval.
    pub fn flex_hours(&self) -> u64 {
        self.flex_hours.unwrap_or(self.interval_hours() / 3)
    }

    pub fn fetch_timeout_secs(&self) -> u64 {
        self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
    }

    pub fn retry_base_secs(&self) -> u64 {
        self.retry_base_secs.unwrap_or(DEFAULT_RETRY_BASE_SECS)
    }

    pub fn retry_max_secs(&self) -> u64 {
        self.retry_max_secs.unwrap_or(DEFAULT_RETRY_MAX_SECS)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            interval_hours: override_config.interval_hours.or(base.interval_hours),
            flex_hours: override_config.flex_hours.or(base.flex_hours),
            fetch_timeout_secs: override_config
                .fetch_timeout_secs
                .or(base.fetch_timeout_secs),
            retry_base_secs: override_config.retry_base_secs.or(base.retry_base_secs),
            retry_max_secs: override_config.retry_max_secs.or(base.retry_max_secs),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_interval_minutes: Option<u64>,

    /// Notifications are allowed only when the local hour is strictly greater.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet_until_hour: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_dismiss_hours: Option<u64>,

    /// Location background image used as the large notification icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
}

impl NotificationConfig {
    pub fn min_interval_minutes(&self) -> u64 {
        self.min_interval_minutes
            .unwrap_or(DEFAULT_MIN_INTERVAL_MINUTES)
    }

    pub fn quiet_until_hour(&self) -> u32 {
        self.quiet_until_hour.unwrap_or(DEFAULT_QUIET_UNTIL_HOUR)
    }

    pub fn auto_dismiss_hours(&self) -> u64 {
        self.auto_dismiss_hours.unwrap_or(DEFAULT_AUTO_DISMISS_HOURS)
    }

    pub fn large_icon(&self) -> Option<&Path> {
        self.large_icon.as_deref()
    }

    pub fn channel_id(&self) -> &str {
        self.channel_id.as_deref().unwrap_or(DEFAULT_CHANNEL_ID)
    }

    pub fn channel_name(&self) -> &str {
        self.channel_name.as_deref().unwrap_or(DEFAULT_CHANNEL_NAME)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            min_interval_minutes: override_config
                .min_interval_minutes
                .or(base.min_interval_minutes),
            quiet_until_hour: override_config.quiet_until_hour.or(base.quiet_until_hour),
            auto_dismiss_hours: override_config
                .auto_dismiss_hours
                .or(base.auto_dismiss_hours),
            large_icon: override_config
                .large_icon
                .clone()
                .or_else(|| base.large_icon.clone()),
            channel_id: override_config
                .channel_id
                .clone()
                .or_else(|| base.channel_id.clone()),
            channel_name: override_config
                .channel_name
                .clone()
                .or_else(|| base.channel_name.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumbs: Option<bool>,
}

impl DebugConfig {
    pub fn breadcrumbs(&self) -> bool {
        self.breadcrumbs.unwrap_or(false)
    }

    pub fn merge(base: &Self, override_config: &Self) -> Self {
        Self {
            breadcrumbs: override_config.breadcrumbs.or(base.breadcrumbs),
        }
    }
}
