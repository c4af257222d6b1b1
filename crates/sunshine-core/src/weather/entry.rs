use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast data point.
///
/// Produced by the fetch layer, read by the cache, the refresh task and the
/// notification gatekeeper. Temperatures are always stored in Celsius; unit
/// conversion happens at formatting time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEntry {
    pub timestamp: DateTime<Utc>,
    /// Degrees Celsius.
    pub temperature: f64,
    /// OpenWeatherMap condition code (e.g. 500 = light rain).
    pub condition_id: u32,
    /// OpenWeatherMap icon code (e.g. `"10d"`).
    pub icon_code: String,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Metres per second.
    pub wind_speed: f64,
    /// Meteorological degrees, 0 = north.
    pub wind_direction: f64,
    /// Hectopascal.
    pub pressure: f64,
}

/// A fetched forecast, ordered by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub entries: Vec<WeatherEntry>,
}

impl Forecast {
    pub fn new(mut entries: Vec<WeatherEntry>) -> Self {
        entries.sort_by_key(|e| e.timestamp);
        Self { entries }
    }

    /// The earliest entry, which is what a new-data notification describes.
    pub fn first(&self) -> Option<&WeatherEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_entry(timestamp: DateTime<Utc>) -> WeatherEntry {
    WeatherEntry {
        timestamp,
        temperature: 21.4,
        condition_id: 500,
        icon_code: "10d".to_string(),
        humidity: 64.0,
        wind_speed: 3.6,
        wind_direction: 225.0,
        pressure: 1014.0,
    }
}
