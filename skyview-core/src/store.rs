//! Weather state owned by the dashboard.
//!
//! [`WeatherStore::fetch_weather_data`] runs the lookup sequence (reverse
//! geocode, then current conditions) and publishes every state change through
//! a `watch` channel so an attached UI can redraw.
//!
//! Overlapping fetches are not serialised. The last write wins on every field.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    error::WeatherError,
    icon::icon_for,
    model::{Coordinates, LocationInfo, RawConditions, WeatherView},
    provider::{ConditionsSource, Geocoder, GoogleMapsClient},
    units::{convert_wind_speed, round_half_up},
};

/// Snapshot of everything the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub loading: bool,
    pub error: Option<String>,
    pub weather_data: Option<WeatherView>,
    pub location_info: LocationInfo,
}

#[derive(Debug)]
pub struct WeatherStore {
    geocoder: Arc<dyn Geocoder>,
    conditions: Arc<dyn ConditionsSource>,
    state: watch::Sender<WeatherState>,
}

impl WeatherStore {
    pub fn new(geocoder: Arc<dyn Geocoder>, conditions: Arc<dyn ConditionsSource>) -> Self {
        let (state, _) = watch::channel(WeatherState::default());
        Self { geocoder, conditions, state }
    }

    pub fn from_client(client: GoogleMapsClient) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client)
    }

    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> WeatherState {
        self.state.borrow().clone()
    }

    /// Look up conditions at `at` and publish the result.
    ///
    /// Never fails: a failure is stored as `error` and the previous
    /// `weather_data` is kept. `loading` is reset on every exit path.
    pub async fn fetch_weather_data(&self, at: Coordinates) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        let _loading = LoadingGuard(&self.state);

        match self.lookup(at).await {
            Ok(view) => {
                tracing::debug!(location = %view.location, "weather updated");
                self.state.send_modify(|s| s.weather_data = Some(view));
            }
            Err(err) => {
                tracing::error!(error = ?err, "weather lookup failed at {at}");
                self.state.send_modify(|s| s.error = Some(err.to_string()));
            }
        }
    }

    async fn lookup(&self, at: Coordinates) -> Result<WeatherView, WeatherError> {
        let address = self.geocoder.reverse_geocode(at).await?;

        match &address {
            Some(address) => self.state.send_modify(|s| {
                s.location_info = LocationInfo {
                    latitude: Some(at.latitude),
                    longitude: Some(at.longitude),
                    address: address.clone(),
                };
            }),
            None => tracing::debug!("no address found for {at}"),
        }

        let raw = self.conditions.current_conditions(at).await?;

        Ok(build_view(&raw, address.as_deref(), at, Utc::now()))
    }

    /// Clear the weather record, the error and the resolved location.
    pub fn reset_weather_data(&self) {
        self.state.send_modify(|s| {
            s.weather_data = None;
            s.error = None;
            s.location_info = LocationInfo::default();
        });
    }
}

struct LoadingGuard<'a>(&'a watch::Sender<WeatherState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_modify(|s| s.loading = false);
    }
}

/// Normalise a provider payload into a fully populated [`WeatherView`].
///
/// `fetched_at` stands in for a missing observation time.
pub fn build_view(
    raw: &RawConditions,
    address: Option<&str>,
    at: Coordinates,
    fetched_at: DateTime<Utc>,
) -> WeatherView {
    let condition_type = raw
        .weather_condition
        .as_ref()
        .and_then(|c| c.kind.clone())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    WeatherView {
        location: address
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| at.to_string()),
        temperature: rounded(raw.temperature.as_ref().and_then(|t| t.degrees)),
        feels_like: rounded(raw.feels_like_temperature.as_ref().and_then(|t| t.degrees)),
        humidity: raw.relative_humidity.unwrap_or_default(),
        pressure: rounded(raw.air_pressure.as_ref().and_then(|p| p.mean_sea_level_millibars)),
        wind_speed: convert_wind_speed(raw.wind.as_ref().and_then(|w| w.speed.as_ref())),
        wind_direction: raw
            .wind
            .as_ref()
            .and_then(|w| w.direction.as_ref())
            .and_then(|d| d.cardinal.clone())
            .unwrap_or_else(|| "N/A".to_string()),
        cloud_cover: raw.cloud_cover.unwrap_or_default(),
        rainfall: raw
            .precipitation
            .as_ref()
            .and_then(|p| p.qpf.as_ref())
            .and_then(|q| q.quantity)
            .unwrap_or_default(),
        condition: raw
            .weather_condition
            .as_ref()
            .and_then(|c| c.description.as_ref())
            .and_then(|d| d.text.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        icon: icon_for(&condition_type).to_string(),
        condition_type,
        uv_index: raw.uv_index.unwrap_or_default(),
        visibility: raw.visibility.as_ref().and_then(|v| v.distance).unwrap_or_default(),
        dew_point: rounded(raw.dew_point.as_ref().and_then(|t| t.degrees)),
        is_daytime: raw.is_daytime.unwrap_or(true),
        current_time: raw.current_time.unwrap_or(fetched_at),
        time_zone: raw
            .time_zone
            .as_ref()
            .and_then(|tz| tz.id.clone())
            .unwrap_or_else(|| "UTC".to_string()),
    }
}

fn rounded(value: Option<f64>) -> i64 {
    value.map(round_half_up).unwrap_or_default() as i64
}
