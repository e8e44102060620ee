use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{Coordinates, RawConditions},
};

pub mod google;

pub use google::GoogleMapsClient;

/// Turns coordinates into a human readable address.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means the lookup succeeded but matched nothing.
    async fn reverse_geocode(&self, at: Coordinates) -> Result<Option<String>, WeatherError>;
}

/// Fetches current conditions for a point.
#[async_trait]
pub trait ConditionsSource: Send + Sync + Debug {
    async fn current_conditions(&self, at: Coordinates) -> Result<RawConditions, WeatherError>;
}
