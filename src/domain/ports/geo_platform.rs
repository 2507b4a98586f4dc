//! Geolocation Platform Port
//!
//! The native positioning capability (browser, OS location service, GPS
//! daemon). It follows a watch model: once subscribed, the platform may
//! report positions repeatedly until the watch is cleared.

use crate::domain::value_objects::Coordinates;

/// Identifier of an active position watch.
pub type WatchId = u64;

/// Invoked with each position the platform reports.
pub type PositionCallback = Box<dyn Fn(Coordinates) + Send + Sync>;

/// Invoked when the platform fails to provide a position.
pub type ErrorCallback = Box<dyn Fn(PlatformError) + Send + Sync>;

/// Errors reported by the platform through the error callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("user denied the geolocation permission")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("timed out waiting for a position")]
    Timeout,
}

/// Native geolocation capability.
pub trait GeoPlatform: Send + Sync {
    /// Whether the platform exposes geolocation.
    fn supported(&self) -> bool;

    /// Start watching the position. Callbacks may fire any number of times
    /// until `clear_watch` is called with the returned id.
    fn watch_position(&self, on_update: PositionCallback, on_error: ErrorCallback) -> WatchId;

    /// Stop a watch started by `watch_position`. Unknown ids are ignored.
    fn clear_watch(&self, id: WatchId);
}
