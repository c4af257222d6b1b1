//! Human readable descriptions for OpenWeatherMap condition codes.

use std::borrow::Cow;

/// Broad condition family, taken from the hundreds digit of the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionGroup {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Extreme,
    Unknown,
}

impl ConditionGroup {
    pub fn of(condition_id: u32) -> Self {
        match condition_id {
            200..=299 => Self::Thunderstorm,
            300..=399 => Self::Drizzle,
            500..=599 => Self::Rain,
            600..=699 => Self::Snow,
            700..=799 => Self::Atmosphere,
            800 => Self::Clear,
            801..=899 => Self::Clouds,
            900..=999 => Self::Extreme,
            _ => Self::Unknown,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Atmosphere => "Low Visibility",
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Extreme => "Extreme Weather",
            Self::Unknown => "Unknown",
        }
    }
}

fn exact(condition_id: u32) -> Option<&'static str> {
    let text = match condition_id {
        200 => "Thunderstorm with Light Rain",
        201 => "Thunderstorm with Rain",
        202 => "Thunderstorm with Heavy Rain",
        210 => "Light Thunderstorm",
        211 => "Thunderstorm",
        212 => "Heavy Thunderstorm",
        221 => "Ragged Thunderstorm",
        230 => "Thunderstorm with Light Drizzle",
        231 => "Thunderstorm with Drizzle",
        232 => "Thunderstorm with Heavy Drizzle",

        300 => "Light Drizzle",
        301 => "Drizzle",
        302 => "Heavy Drizzle",
        310 => "Light Drizzle Rain",
        311 => "Drizzle Rain",
        312 => "Heavy Drizzle Rain",
        313 => "Shower Rain and Drizzle",
        314 => "Heavy Shower Rain and Drizzle",
        321 => "Shower Drizzle",

        500 => "Light Rain",
        501 => "Moderate Rain",
        502 => "Heavy Rain",
        503 => "Intense Rain",
        504 => "Extreme Rain",
        511 => "Freezing Rain",
        520 => "Light Shower",
        521 => "Shower",
        522 => "Heavy Shower",
        531 => "Ragged Shower",

        600 => "Light Snow",
        601 => "Snow",
        602 => "Heavy Snow",
        611 => "Sleet",
        612 => "Light Shower Sleet",
        613 => "Shower Sleet",
        615 => "Light Rain and Snow",
        616 => "Rain and Snow",
        620 => "Light Shower Snow",
        621 => "Shower Snow",
        622 => "Heavy Shower Snow",

        701 => "Mist",
        711 => "Smoke",
        721 => "Haze",
        731 => "Sand, Dust",
        741 => "Fog",
        751 => "Sand",
        761 => "Dust",
        762 => "Volcanic Ash",
        771 => "Squalls",
        781 => "Tornado",

        800 => "Clear",
        801 => "Mostly Clear",
        802 => "Scattered Clouds",
        803 => "Broken Clouds",
        804 => "Overcast Clouds",

        900 => "Tornado",
        901 => "Tropical Storm",
        902 => "Hurricane",
        903 => "Cold",
        904 => "Hot",
        905 => "Windy",
        906 => "Hail",
        _ => return None,
    };
    Some(text)
}

/// Description shown as the notification body and in `sunshine show`.
///
/// Unlisted codes fall back to their group; codes outside every group are
/// reported with the raw number so they can be added later.
pub fn describe(condition_id: u32) -> Cow<'static, str> {
    if let Some(text) = exact(condition_id) {
        return Cow::Borrowed(text);
    }
    match ConditionGroup::of(condition_id) {
        ConditionGroup::Unknown => Cow::Owned(format!("Unknown Condition ({})", condition_id)),
        group => Cow::Borrowed(group.label()),
    }
}
