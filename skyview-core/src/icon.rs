use std::fmt;

/// Sky and precipitation categories reported by the conditions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionType {
    Clear,
    PartlyCloudy,
    Cloudy,
    Overcast,
    Rain,
    LightRain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
    Fog,
    Mist,
    Haze,
    Windy,
    Tornado,
    Hurricane,
    Unknown,
}

impl ConditionType {
    pub const fn all() -> &'static [ConditionType] {
        &[
            ConditionType::Clear,
            ConditionType::PartlyCloudy,
            ConditionType::Cloudy,
            ConditionType::Overcast,
            ConditionType::Rain,
            ConditionType::LightRain,
            ConditionType::HeavyRain,
            ConditionType::Snow,
            ConditionType::Sleet,
            ConditionType::Thunderstorm,
            ConditionType::Fog,
            ConditionType::Mist,
            ConditionType::Haze,
            ConditionType::Windy,
            ConditionType::Tornado,
            ConditionType::Hurricane,
            ConditionType::Unknown,
        ]
    }

    /// Parse a provider token. Anything unrecognised becomes `Unknown`.
    pub fn parse(token: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == token)
            .unwrap_or(ConditionType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionType::Clear => "CLEAR",
            ConditionType::PartlyCloudy => "PARTLY_CLOUDY",
            ConditionType::Cloudy => "CLOUDY",
            ConditionType::Overcast => "OVERCAST",
            ConditionType::Rain => "RAIN",
            ConditionType::LightRain => "LIGHT_RAIN",
            ConditionType::HeavyRain => "HEAVY_RAIN",
            ConditionType::Snow => "SNOW",
            ConditionType::Sleet => "SLEET",
            ConditionType::Thunderstorm => "THUNDERSTORM",
            ConditionType::Fog => "FOG",
            ConditionType::Mist => "MIST",
            ConditionType::Haze => "HAZE",
            ConditionType::Windy => "WINDY",
            ConditionType::Tornado => "TORNADO",
            ConditionType::Hurricane => "HURRICANE",
            ConditionType::Unknown => "UNKNOWN",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ConditionType::Clear => "☀️",
            ConditionType::PartlyCloudy => "⛅",
            ConditionType::Cloudy | ConditionType::Overcast => "☁️",
            ConditionType::Rain | ConditionType::HeavyRain => "🌧️",
            ConditionType::LightRain => "🌦️",
            ConditionType::Snow => "❄️",
            ConditionType::Sleet => "🌨️",
            ConditionType::Thunderstorm => "⛈️",
            ConditionType::Fog | ConditionType::Mist | ConditionType::Haze => "🌫️",
            ConditionType::Windy => "💨",
            ConditionType::Tornado => "🌪️",
            ConditionType::Hurricane => "🌀",
            ConditionType::Unknown => "🌤️",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display glyph for a raw condition token.
pub fn icon_for(condition_type: &str) -> &'static str {
    ConditionType::parse(condition_type).icon()
}
