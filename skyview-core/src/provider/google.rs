use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::Config,
    error::{WeatherError, classify_failure},
    model::{Coordinates, RawConditions},
};

use super::{ConditionsSource, Geocoder};

pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const CONDITIONS_URL: &str = "https://weather.googleapis.com/v1/currentConditions:lookup";

/// Client for the Google geocoding and weather endpoints.
#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    api_key: String,
    geocode_url: String,
    conditions_url: String,
    http: Client,
}

/// Reverse geocoding response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResponse {
    pub status: String,
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeocodeResult {
    pub formatted_address: String,
}

impl GeocodeResponse {
    pub fn first_address(&self) -> Option<&str> {
        self.results.first().map(|r| r.formatted_address.as_str())
    }
}

impl GoogleMapsClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoints(api_key, GEOCODE_URL.to_string(), CONDITIONS_URL.to_string())
    }

    pub fn with_endpoints(api_key: String, geocode_url: String, conditions_url: String) -> Self {
        Self {
            api_key,
            geocode_url,
            conditions_url,
            http: Client::new(),
        }
    }

    /// Build a client from config. The credential is resolved once, here.
    pub fn from_config(config: &Config) -> Self {
        Self::with_endpoints(
            config.resolve_api_key(),
            config.geocode_url.clone().unwrap_or_else(|| GEOCODE_URL.to_string()),
            config.conditions_url.clone().unwrap_or_else(|| CONDITIONS_URL.to_string()),
        )
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Raw reverse geocoding call.
    pub async fn geocode(&self, at: Coordinates) -> Result<GeocodeResponse, WeatherError> {
        let latlng = format!("{},{}", at.latitude, at.longitude);
        self.get_json(
            &self.geocode_url,
            &[("latlng", latlng.as_str()), ("key", self.api_key.as_str())],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "provider rejected request");
            return Err(classify_failure(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn reverse_geocode(&self, at: Coordinates) -> Result<Option<String>, WeatherError> {
        let response = self.geocode(at).await?;

        if !matches!(response.status.as_str(), "OK" | "ZERO_RESULTS" | "") {
            tracing::warn!(
                status = %response.status,
                error_message = response.error_message.as_deref().unwrap_or_default(),
                "geocoding returned no usable result"
            );
        }

        Ok(response.first_address().map(str::to_string))
    }
}

#[async_trait]
impl ConditionsSource for GoogleMapsClient {
    async fn current_conditions(&self, at: Coordinates) -> Result<RawConditions, WeatherError> {
        let latitude = at.latitude.to_string();
        let longitude = at.longitude.to_string();

        self.get_json(
            &self.conditions_url,
            &[
                ("key", self.api_key.as_str()),
                ("location.latitude", latitude.as_str()),
                ("location.longitude", longitude.as_str()),
            ],
        )
        .await
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
