use chrono::SecondsFormat;
use skyview_core::{RawConditions, WeatherError, WeatherView};
use std::fmt::Write;

pub fn weather_view(view: &WeatherView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", view.icon, view.location);
    let _ = writeln!(out, "  {} ({})", view.condition, view.condition_type);
    let _ = writeln!(out, "  Temperature: {}° (feels like {}°)", view.temperature, view.feels_like);
    let _ = writeln!(out, "  Humidity:    {}%", view.humidity);
    let _ = writeln!(out, "  Pressure:    {} hPa", view.pressure);
    let _ = writeln!(out, "  Wind:        {} m/s {}", view.wind_speed, view.wind_direction);
    let _ = writeln!(out, "  Clouds:      {}%", view.cloud_cover);
    let _ = writeln!(out, "  Rainfall:    {}", view.rainfall);
    let _ = writeln!(out, "  UV index:    {}", view.uv_index);
    let _ = writeln!(out, "  Visibility:  {}", view.visibility);
    let _ = writeln!(out, "  Dew point:   {}°", view.dew_point);
    let _ = writeln!(
        out,
        "  Observed:    {} {} ({})",
        view.current_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        view.time_zone,
        if view.is_daytime { "day" } else { "night" }
    );
    out
}

/// Short summary of a raw payload, shown by `check`.
pub fn raw_summary(raw: &RawConditions) -> String {
    let temperature = raw.temperature.as_ref().and_then(|t| t.degrees);
    let condition = raw
        .weather_condition
        .as_ref()
        .and_then(|c| c.description.as_ref())
        .and_then(|d| d.text.as_deref());
    let kmh = raw
        .wind
        .as_ref()
        .and_then(|w| w.speed.as_ref())
        .and_then(|s| s.speed_kilometers_per_hour);

    let mut out = String::new();
    let _ = writeln!(out, "   - Temperature: {}", or_dash(temperature));
    let _ = writeln!(out, "   - Humidity: {}", or_dash(raw.relative_humidity));
    let _ = writeln!(out, "   - Condition: {}", condition.unwrap_or("-"));
    let _ = writeln!(out, "   - Wind: {} km/h", kmh.unwrap_or_default());
    out
}

fn or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// First ten and last four characters of the key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 14 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

pub fn troubleshooting(err: &WeatherError) -> &'static [&'static str] {
    match err {
        WeatherError::AuthOrConfig => &[
            "Check that the API key is correct",
            "Enable the Weather API in the Google Cloud Console",
            "Make sure billing is enabled for the project",
            "Verify the key's API restrictions allow the Weather API",
        ],
        WeatherError::EndpointNotFound => &[
            "Enable the Weather API in the Google Cloud Console",
            "Check the endpoint URLs in the config file",
            "Verify you are using the correct API key",
        ],
        WeatherError::Provider(_) => &[],
        WeatherError::Generic(_) => &[
            "Check your internet connection",
            "Verify the endpoint URLs in the config file",
            "Check for firewall restrictions",
        ],
    }
}
