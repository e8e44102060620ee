//! Core library for the `skyview` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather lookup pipeline (reverse geocode, current conditions, normalisation)
//! - A geolocation abstraction over host position sources
//! - In-memory project, floor plan and camera registries
//!
//! It is used by `skyview-cli`, but can also back other front ends.

pub mod config;
pub mod error;
pub mod icon;
pub mod location;
pub mod model;
pub mod provider;
pub mod site;
pub mod store;
pub mod units;

pub use config::Config;
pub use error::WeatherError;
pub use icon::{ConditionType, icon_for};
pub use location::{FixedPosition, LocationError, PositionSource, get_current_location};
pub use model::{Coordinates, LocationInfo, RawConditions, WeatherView};
pub use provider::{ConditionsSource, Geocoder, GoogleMapsClient};
pub use store::{WeatherState, WeatherStore, build_view};
pub use units::convert_wind_speed;
