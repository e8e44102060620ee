use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::Coordinates;

/// Why a position source could not produce a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Position unavailable")]
    PositionUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported on this host")]
    Unsupported,
    #[error("Unable to retrieve your location")]
    Unavailable,
}

/// Host capability that can report the current position once.
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, PositionError>;
}

/// Source that always reports the same configured coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

/// Request a single position fix.
///
/// `None` means the host has no geolocation capability at all. Every host
/// reported failure collapses into [`LocationError::Unavailable`].
pub async fn get_current_location(
    source: Option<&dyn PositionSource>,
) -> Result<Coordinates, LocationError> {
    let source = source.ok_or(LocationError::Unsupported)?;

    source.current_position().await.map_err(|err| {
        tracing::debug!("position request failed: {err}");
        LocationError::Unavailable
    })
}
