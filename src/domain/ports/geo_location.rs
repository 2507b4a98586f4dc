//! Geolocation Service Port
//!
//! Defines the interface for acquiring the user's current position.

use crate::domain::errors::GeoError;
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;

/// Service that determines the current geographic position.
///
/// Implementations may talk to the platform directly or decorate another
/// `GeoLocationService` (e.g. with a cache); both expose the same interface
/// so they can be chained.
#[async_trait]
pub trait GeoLocationService: Send + Sync {
    /// Whether the platform can provide a position at all.
    fn is_supported(&self) -> bool;

    /// Determine the current position.
    ///
    /// Fails with `UnsupportedCapability` when the platform has no
    /// geolocation, or `AcquisitionFailed` when the user denies permission
    /// or the platform reports an error.
    async fn determine_position(&self) -> Result<Coordinates, GeoError>;
}
