//! Unit-aware formatting of forecast values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    pub fn from_metric_flag(metric: bool) -> Self {
        if metric { Self::Metric } else { Self::Imperial }
    }

    pub fn is_metric(self) -> bool {
        matches!(self, Self::Metric)
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Metric => write!(f, "metric"),
            Units::Imperial => write!(f, "imperial"),
        }
    }
}

impl std::str::FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Units::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Units::Imperial),
            other => Err(format!(
                "Unknown units '{}'. Expected 'metric' or 'imperial'",
                other
            )),
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// `"21°C"` / `"71°F"`. Rounded to whole degrees; `-0` is printed as `0`.
pub fn format_temperature(celsius: f64, units: Units) -> String {
    let (value, suffix) = match units {
        Units::Metric => (celsius, 'C'),
        Units::Imperial => (celsius_to_fahrenheit(celsius), 'F'),
    };
    let rounded = value.round();
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.0}\u{00B0}{}", rounded, suffix)
}

/// Eight-point compass bearing for a meteorological wind direction.
pub fn compass_direction(degrees: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[index]
}

/// Wind speed from m/s: km/h for metric, mph for imperial, plus direction.
pub fn format_wind(speed_mps: f64, degrees: f64, units: Units) -> String {
    let direction = compass_direction(degrees);
    match units {
        Units::Metric => format!("{:.0} km/h {}", speed_mps * 3.6, direction),
        Units::Imperial => format!("{:.0} mph {}", speed_mps * 2.236_936, direction),
    }
}

pub fn format_humidity(humidity: f64) -> String {
    format!("{:.0}%", humidity)
}

pub fn format_pressure(pressure: f64) -> String {
    format!("{:.0} hPa", pressure)
}
