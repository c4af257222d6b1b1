//! Weather data model and presentation helpers.

pub mod conditions;
pub mod entry;
pub mod format;
pub mod icons;

pub use conditions::{ConditionGroup, describe};
pub use entry::{Forecast, WeatherEntry};
pub use format::{Units, format_temperature, format_wind};
pub use icons::WeatherIcon;
