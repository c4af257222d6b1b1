//! OpenWeatherMap response parsing.
//!
//! A current weather body has the same shape as one item of the 5 day /
//! 3 hour forecast list.

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use super::errors::FetchError;
use crate::weather::{Forecast, WeatherEntry};

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt: i64,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    wind: WindBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    #[serde(default)]
    humidity: f64,
    #[serde(default)]
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    id: u32,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

/// Parse a forecast body into entries sorted by time.
///
/// Items without a condition block or with an out-of-range timestamp are
/// skipped. A body that yields no entries is `FetchError::EmptyForecast`.
pub fn parse_forecast(body: &str) -> Result<Forecast, FetchError> {
    let response: ForecastResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse {
            message: e.to_string(),
        })?;

    let total = response.list.len();
    let entries: Vec<WeatherEntry> = response
        .list
        .into_iter()
        .filter_map(into_entry)
        .collect();

    if entries.len() < total {
        debug!(
            event = "core.fetch.items_skipped",
            skipped = total - entries.len(),
            total = total,
        );
    }

    if entries.is_empty() {
        return Err(FetchError::EmptyForecast);
    }

    Ok(Forecast::new(entries))
}

/// Parse a current weather body.
pub fn parse_current(body: &str) -> Result<WeatherEntry, FetchError> {
    let item: ForecastItem = serde_json::from_str(body).map_err(|e| FetchError::Parse {
        message: e.to_string(),
    })?;
    into_entry(item).ok_or_else(|| FetchError::Parse {
        message: "current weather has no condition or an invalid timestamp".to_string(),
    })
}

fn into_entry(item: ForecastItem) -> Option<WeatherEntry> {
    let timestamp = DateTime::from_timestamp(item.dt, 0)?;
    let condition = item.weather.into_iter().next()?;
    Some(WeatherEntry {
        timestamp,
        temperature: item.main.temp,
        condition_id: condition.id,
        icon_code: condition.icon,
        humidity: item.main.humidity,
        wind_speed: item.wind.speed,
        wind_direction: item.wind.deg,
        pressure: item.main.pressure,
    })
}
