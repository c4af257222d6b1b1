//! OpenWeatherMap fetcher for the forecast and current weather endpoints.

use std::time::Duration;

use reqwest::Url;
use sunshine_config::SunshineConfig;
use tracing::{debug, info};

use super::errors::FetchError;
use super::parser::{parse_current, parse_forecast};
use super::{CurrentWeatherFetcher, WeatherFetcher};
use crate::weather::{Forecast, WeatherEntry};

const FORECAST_ENDPOINT: &str = "forecast";
const CURRENT_ENDPOINT: &str = "weather";

/// Blocking HTTP fetcher for the 5 day / 3 hour forecast and the current
/// weather endpoints.
///
/// The HTTP client timeout is the bounded wait of one refresh attempt.
pub struct OpenWeatherFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
    coordinates: Option<(f64, f64)>,
    city: Option<String>,
    timeout_secs: u64,
}

impl OpenWeatherFetcher {
    pub fn new(config: &SunshineConfig) -> Result<Self, FetchError> {
        let timeout_secs = config.sync.fetch_timeout_secs();
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("sunshine/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Internal {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.api.base_url().trim_end_matches('/').to_string(),
            api_key: config.api.key().map(str::to_string),
            coordinates: config.location.coordinates(),
            city: config.location.city().map(str::to_string),
            timeout_secs,
        })
    }

    pub fn forecast_url(&self) -> Result<Url, FetchError> {
        self.endpoint_url(FORECAST_ENDPOINT)
    }

    pub fn current_url(&self) -> Result<Url, FetchError> {
        self.endpoint_url(CURRENT_ENDPOINT)
    }

    /// Build the request URL. Coordinates win over the city name.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, FetchError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| FetchError::NotConfigured {
            message: "no API key (set [api] key or SUNSHINE_API_KEY)".to_string(),
        })?;

        let mut params: Vec<(&str, String)> = Vec::with_capacity(4);
        match (self.coordinates, self.city.as_deref()) {
            (Some((lat, lon)), _) => {
                params.push(("lat", lat.to_string()));
                params.push(("lon", lon.to_string()));
            }
            (None, Some(city)) => params.push(("q", city.to_string())),
            (None, None) => {
                return Err(FetchError::NotConfigured {
                    message: "no location (set [location] city or lat/lon)".to_string(),
                });
            }
        }
        params.push(("units", "metric".to_string()));
        params.push(("appid", api_key.to_string()));

        Url::parse_with_params(&format!("{}/{}", self.base_url, endpoint), &params).map_err(|e| {
            FetchError::NotConfigured {
                message: format!("invalid api.base_url '{}': {}", self.base_url, e),
            }
        })
    }

    fn get_body(&self, url: Url) -> Result<String, FetchError> {
        info!(
            event = "core.fetch.request_started",
            host = url.host_str().unwrap_or_default(),
            path = url.path(),
            timeout_secs = self.timeout_secs,
        );

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }
        Ok(body)
    }

    fn map_request_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            FetchError::Network {
                message: e.to_string(),
            }
        }
    }
}

impl WeatherFetcher for OpenWeatherFetcher {
    fn fetch(&self) -> Result<Forecast, FetchError> {
        let body = self.get_body(self.forecast_url()?)?;
        let forecast = parse_forecast(&body)?;
        debug!(event = "core.fetch.request_completed", entries = forecast.len());
        Ok(forecast)
    }
}

impl CurrentWeatherFetcher for OpenWeatherFetcher {
    fn fetch_current(&self) -> Result<WeatherEntry, FetchError> {
        let body = self.get_body(self.current_url()?)?;
        let entry = parse_current(&body)?;
        debug!(
            event = "core.fetch.current_completed",
            condition_id = entry.condition_id,
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml_str: &str) -> SunshineConfig {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_url_uses_coordinates_first() {
        let fetcher = OpenWeatherFetcher::new(&config(
            r#"
[location]
city = "Craiova,RO"
lat = 44.31
lon = 23.8

[api]
key = "abc"
"#,
        ))
        .unwrap();
        let url = fetcher.forecast_url().unwrap();
        assert_eq!(url.path(), "/data/2.5/forecast");
        let query = url.query().unwrap();
        assert!(query.contains("lat=44.31"));
        assert!(query.contains("lon=23.8"));
        assert!(query.contains("units=metric"));
        assert!(query.contains("appid=abc"));
        assert!(!query.contains("q="));
    }

    #[test]
    fn test_url_with_city() {
        let fetcher = OpenWeatherFetcher::new(&config(
            r#"
[location]
city = "Craiova,RO"

[api]
key = "abc"
base_url = "http://localhost:9000/owm/"
"#,
        ))
        .unwrap();
        let url = fetcher.forecast_url().unwrap();
        assert_eq!(url.as_str().split('?').next(), Some("http://localhost:9000/owm/forecast"));
        assert!(url.query().unwrap().contains("q=Craiova%2CRO"));
    }

    #[test]
    fn test_current_url_targets_weather_endpoint() {
        let fetcher = OpenWeatherFetcher::new(&config(
            r#"
[location]
lat = 44.31
lon = 23.8

[api]
key = "abc"
"#,
        ))
        .unwrap();
        let url = fetcher.current_url().unwrap();
        assert_eq!(url.path(), "/data/2.5/weather");
        assert!(url.query().unwrap().contains("lat=44.31"));
    }

    #[test]
    fn test_current_without_key_is_not_configured() {
        let fetcher = OpenWeatherFetcher::new(&config(
            r#"
[location]
city = "Craiova,RO"
"#,
        ))
        .unwrap();
        let err = fetcher.fetch_current().unwrap_err();
        assert!(matches!(err, FetchError::NotConfigured { .. }));
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let fetcher = OpenWeatherFetcher::new(&config(
            r#"
[location]
city = "Craiova,RO"
"#,
        ))
        .unwrap();
        let err = fetcher.fetch().unwrap_err();
        assert!(matches!(err, FetchError::NotConfigured { .. }));
    }

    #[test]
    fn test_missing_location_is_not_configured() {
        let fetcher = OpenWeatherFetcher::new(&config(
            r#"
[api]
key = "abc"
"#,
        ))
        .unwrap();
        let err = fetcher.forecast_url().unwrap_err();
        assert!(err.to_string().contains("no location"));
    }
}
