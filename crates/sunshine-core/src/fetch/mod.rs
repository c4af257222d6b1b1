//! Forecast retrieval.
//!
//! The refresh task depends only on [`WeatherFetcher`] and the current
//! conditions refresh only on [`CurrentWeatherFetcher`]; the production
//! implementation of both is [`OpenWeatherFetcher`].

pub mod errors;
pub mod openweather;
pub mod parser;

pub use errors::FetchError;
pub use openweather::OpenWeatherFetcher;

use crate::weather::{Forecast, WeatherEntry};

/// One synchronous forecast fetch.
///
/// Implementations must bound their own wait and report an elapsed bound as
/// [`FetchError::Timeout`]. Fetching only reads, so repeating a failed call
/// is always safe.
pub trait WeatherFetcher: Send + Sync {
    fn fetch(&self) -> Result<Forecast, FetchError>;
}

/// One synchronous fetch of the conditions observed right now.
pub trait CurrentWeatherFetcher: Send + Sync {
    fn fetch_current(&self) -> Result<WeatherEntry, FetchError>;
}
