//! Mapping from forecast icon codes to desktop icon names.

use super::conditions::ConditionGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Clear,
    ClearNight,
    FewClouds,
    FewCloudsNight,
    Overcast,
    Showers,
    ShowersScattered,
    Storm,
    Snow,
    Fog,
    SevereAlert,
}

impl WeatherIcon {
    /// Resolve an OpenWeatherMap icon code such as `"10d"` or `"01n"`.
    ///
    /// Returns `None` for malformed or unknown codes.
    pub fn from_icon_code(code: &str) -> Option<Self> {
        let (number, variant) = code.split_at_checked(2)?;
        let night = match variant {
            "d" => false,
            "n" => true,
            _ => return None,
        };
        let icon = match (number, night) {
            ("01", false) => Self::Clear,
            ("01", true) => Self::ClearNight,
            ("02", false) => Self::FewClouds,
            ("02", true) => Self::FewCloudsNight,
            ("03" | "04", _) => Self::Overcast,
            ("09", _) => Self::Showers,
            ("10", _) => Self::ShowersScattered,
            ("11", _) => Self::Storm,
            ("13", _) => Self::Snow,
            ("50", _) => Self::Fog,
            _ => return None,
        };
        Some(icon)
    }

    /// Fallback when the icon code is missing: derive from the condition code.
    pub fn from_condition_id(condition_id: u32) -> Self {
        match ConditionGroup::of(condition_id) {
            ConditionGroup::Thunderstorm => Self::Storm,
            ConditionGroup::Drizzle => Self::ShowersScattered,
            ConditionGroup::Rain => Self::Showers,
            ConditionGroup::Snow => Self::Snow,
            ConditionGroup::Atmosphere => Self::Fog,
            ConditionGroup::Clear => Self::Clear,
            ConditionGroup::Clouds if condition_id == 801 => Self::FewClouds,
            ConditionGroup::Clouds => Self::Overcast,
            ConditionGroup::Extreme | ConditionGroup::Unknown => Self::SevereAlert,
        }
    }

    pub fn resolve(icon_code: &str, condition_id: u32) -> Self {
        Self::from_icon_code(icon_code).unwrap_or_else(|| Self::from_condition_id(condition_id))
    }

    /// freedesktop.org icon naming specification name.
    pub fn freedesktop_name(self) -> &'static str {
        match self {
            Self::Clear => "weather-clear",
            Self::ClearNight => "weather-clear-night",
            Self::FewClouds => "weather-few-clouds",
            Self::FewCloudsNight => "weather-few-clouds-night",
            Self::Overcast => "weather-overcast",
            Self::Showers => "weather-showers",
            Self::ShowersScattered => "weather-showers-scattered",
            Self::Storm => "weather-storm",
            Self::Snow => "weather-snow",
            Self::Fog => "weather-fog",
            Self::SevereAlert => "weather-severe-alert",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_and_night_codes() {
        assert_eq!(WeatherIcon::from_icon_code("01d"), Some(WeatherIcon::Clear));
        assert_eq!(
            WeatherIcon::from_icon_code("01n"),
            Some(WeatherIcon::ClearNight)
        );
        assert_eq!(
            WeatherIcon::from_icon_code("10n"),
            Some(WeatherIcon::ShowersScattered)
        );
        assert_eq!(WeatherIcon::from_icon_code("04d"), Some(WeatherIcon::Overcast));
    }

    #[test]
    fn test_malformed_codes() {
        assert_eq!(WeatherIcon::from_icon_code(""), None);
        assert_eq!(WeatherIcon::from_icon_code("1"), None);
        assert_eq!(WeatherIcon::from_icon_code("01x"), None);
        assert_eq!(WeatherIcon::from_icon_code("77d"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_condition() {
        assert_eq!(WeatherIcon::resolve("", 211), WeatherIcon::Storm);
        assert_eq!(WeatherIcon::resolve("??", 801), WeatherIcon::FewClouds);
        assert_eq!(WeatherIcon::resolve("13d", 211), WeatherIcon::Snow);
    }

    #[test]
    fn test_freedesktop_names() {
        assert_eq!(WeatherIcon::Clear.freedesktop_name(), "weather-clear");
        assert_eq!(
            WeatherIcon::from_condition_id(42).freedesktop_name(),
            "weather-severe-alert"
        );
    }
}
