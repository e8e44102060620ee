use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::WindSpeed;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", unsigned_zero(self.latitude), unsigned_zero(self.longitude))
    }
}

// Negative zero renders as "-0"; the label wants "0".
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// The most recently resolved place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: String,
}

impl LocationInfo {
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none() && self.address.is_empty()
    }
}

/// Current conditions payload as returned by the conditions endpoint.
///
/// Every field is optional; normalisation into [`WeatherView`] supplies the
/// fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConditions {
    pub current_time: Option<DateTime<Utc>>,
    pub time_zone: Option<TimeZone>,
    pub is_daytime: Option<bool>,
    pub weather_condition: Option<WeatherCondition>,
    pub temperature: Option<Temperature>,
    pub feels_like_temperature: Option<Temperature>,
    pub dew_point: Option<Temperature>,
    pub relative_humidity: Option<f64>,
    pub uv_index: Option<f64>,
    pub precipitation: Option<Precipitation>,
    pub air_pressure: Option<AirPressure>,
    pub wind: Option<Wind>,
    pub visibility: Option<Visibility>,
    pub cloud_cover: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperature {
    pub degrees: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AirPressure {
    pub mean_sea_level_millibars: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub direction: Option<WindDirection>,
    pub speed: Option<WindSpeed>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindDirection {
    pub degrees: Option<f64>,
    pub cardinal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precipitation {
    pub qpf: Option<Qpf>,
}

/// Quantitative precipitation forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Qpf {
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    pub description: Option<ConditionDescription>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionDescription {
    pub text: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visibility {
    pub distance: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeZone {
    pub id: Option<String>,
}

/// Fully populated weather record handed to presentation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherView {
    pub location: String,
    /// Degrees, rounded.
    pub temperature: i64,
    pub feels_like: i64,
    /// Percent.
    pub humidity: f64,
    /// Hectopascal, rounded.
    pub pressure: i64,
    /// Metres per second, two decimals.
    pub wind_speed: f64,
    pub wind_direction: String,
    /// Percent.
    pub cloud_cover: f64,
    pub rainfall: f64,
    pub condition: String,
    pub condition_type: String,
    pub icon: String,
    pub uv_index: f64,
    pub visibility: f64,
    pub dew_point: i64,
    pub is_daytime: bool,
    pub current_time: DateTime<Utc>,
    pub time_zone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_display_matches_fallback_label() {
        let c = Coordinates::new(40.7128, -74.006);
        assert_eq!(c.to_string(), "40.7128, -74.006");
    }

    #[test]
    fn coordinates_display_drops_negative_zero() {
        assert_eq!(Coordinates::new(-0.0, 0.0).to_string(), "0, 0");
        assert_eq!(Coordinates::new(0.0, -0.0).to_string(), "0, 0");
        assert_eq!(Coordinates::new(-0.5, -1.0).to_string(), "-0.5, -1");
    }

    #[test]
    fn empty_location_info() {
        assert!(LocationInfo::default().is_empty());

        let info = LocationInfo { address: "Somewhere".into(), ..Default::default() };
        assert!(!info.is_empty());
    }

    #[test]
    fn raw_conditions_accept_partial_payloads() {
        let raw: RawConditions = serde_json::from_str(
            r#"{
                "temperature": {"degrees": 22.4, "unit": "CELSIUS"},
                "weatherCondition": {"type": "CLEAR", "description": {"text": "Sunny"}},
                "wind": {"speed": {"speedKilometersPerHour": 7}},
                "somethingNew": [1, 2, 3]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.temperature.and_then(|t| t.degrees), Some(22.4));
        assert_eq!(
            raw.weather_condition.as_ref().and_then(|w| w.kind.as_deref()),
            Some("CLEAR")
        );
        assert!(raw.relative_humidity.is_none());
        assert!(raw.air_pressure.is_none());
    }

    #[test]
    fn raw_conditions_from_empty_object() {
        let raw: RawConditions = serde_json::from_str("{}").unwrap();
        assert_eq!(raw, RawConditions::default());
    }
}
