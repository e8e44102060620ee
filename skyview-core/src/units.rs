use serde::{Deserialize, Serialize};

const KMH_TO_MPS: f64 = 3.6;
const MPH_TO_MPS: f64 = 0.44704;
const KNOTS_TO_MPS: f64 = 0.51444;

/// Wind speed as reported by the conditions endpoint.
///
/// At most one field is expected to carry a value; when several do, they are
/// read in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindSpeed {
    pub speed_kilometers_per_hour: Option<f64>,
    pub speed_miles_per_hour: Option<f64>,
    pub speed_knots: Option<f64>,
    pub speed_meters_per_second: Option<f64>,
}

/// Convert whatever unit the provider used into metres per second, rounded to
/// two decimals. Returns `0.0` when nothing usable is present.
pub fn convert_wind_speed(wind: Option<&WindSpeed>) -> f64 {
    let Some(wind) = wind else {
        return 0.0;
    };

    if let Some(kmh) = populated(wind.speed_kilometers_per_hour) {
        round_to_hundredths(kmh / KMH_TO_MPS)
    } else if let Some(mph) = populated(wind.speed_miles_per_hour) {
        round_to_hundredths(mph * MPH_TO_MPS)
    } else if let Some(knots) = populated(wind.speed_knots) {
        round_to_hundredths(knots * KNOTS_TO_MPS)
    } else if let Some(mps) = populated(wind.speed_meters_per_second) {
        round_to_hundredths(mps)
    } else {
        0.0
    }
}

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn round_to_hundredths(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

// A zero reading is treated like a missing one.
fn populated(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_wind_is_zero() {
        assert_eq!(convert_wind_speed(None), 0.0);
        assert_eq!(convert_wind_speed(Some(&WindSpeed::default())), 0.0);
    }

    #[test]
    fn kilometers_per_hour() {
        let wind = WindSpeed { speed_kilometers_per_hour: Some(36.0), ..Default::default() };
        assert_eq!(convert_wind_speed(Some(&wind)), 10.0);
    }

    #[test]
    fn miles_per_hour() {
        let wind = WindSpeed { speed_miles_per_hour: Some(10.0), ..Default::default() };
        assert_eq!(convert_wind_speed(Some(&wind)), 4.47);
    }

    #[test]
    fn knots() {
        let wind = WindSpeed { speed_knots: Some(20.0), ..Default::default() };
        assert_eq!(convert_wind_speed(Some(&wind)), 10.29);
    }

    #[test]
    fn meters_per_second_is_rounded() {
        let wind = WindSpeed { speed_meters_per_second: Some(3.14159), ..Default::default() };
        assert_eq!(convert_wind_speed(Some(&wind)), 3.14);
    }

    #[test]
    fn kilometers_per_hour_wins_over_later_fields() {
        let wind = WindSpeed {
            speed_kilometers_per_hour: Some(18.0),
            speed_miles_per_hour: Some(100.0),
            speed_knots: Some(100.0),
            speed_meters_per_second: Some(100.0),
        };
        assert_eq!(convert_wind_speed(Some(&wind)), 5.0);
    }

    #[test]
    fn zero_reading_falls_through() {
        let wind = WindSpeed {
            speed_kilometers_per_hour: Some(0.0),
            speed_miles_per_hour: Some(10.0),
            ..Default::default()
        };
        assert_eq!(convert_wind_speed(Some(&wind)), 4.47);
    }

    #[test]
    fn deserializes_provider_keys() {
        let wind: WindSpeed = serde_json::from_str(r#"{"speedKnots": 10}"#).unwrap();
        assert_eq!(wind.speed_knots, Some(10.0));
        assert_eq!(wind.speed_kilometers_per_hour, None);
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(21.4), 21.0);
    }
}
