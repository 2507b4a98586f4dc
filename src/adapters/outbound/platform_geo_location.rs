//! Platform Geolocation Service
//!
//! Implements GeoLocationService on top of the native `GeoPlatform`
//! capability.

use crate::domain::errors::GeoError;
use crate::domain::ports::{GeoLocationService, GeoPlatform, PlatformError, WatchId};
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;

type Report = Result<Coordinates, PlatformError>;

/// Geolocation through the platform's position watch.
///
/// The platform only offers a continuous watch, so each request starts a
/// watch, takes the first report (position or error) and clears the watch
/// again. Later reports for the same request are dropped.
pub struct PlatformGeoLocationService {
    platform: Arc<dyn GeoPlatform>,
}

impl PlatformGeoLocationService {
    pub fn new(platform: Arc<dyn GeoPlatform>) -> Self {
        Self { platform }
    }
}

/// Clears the watch when the request completes or is dropped mid-flight.
struct WatchGuard<'a> {
    platform: &'a dyn GeoPlatform,
    id: WatchId,
}

impl Drop for WatchGuard<'_> {
    fn drop(&mut self) {
        self.platform.clear_watch(self.id);
    }
}

#[async_trait]
impl GeoLocationService for PlatformGeoLocationService {
    fn is_supported(&self) -> bool {
        self.platform.supported()
    }

    async fn determine_position(&self) -> Result<Coordinates, GeoError> {
        if !self.is_supported() {
            return Err(GeoError::UnsupportedCapability);
        }

        let (tx, rx) = oneshot::channel::<Report>();
        let on_update_tx = Arc::new(Mutex::new(Some(tx)));
        let on_error_tx = on_update_tx.clone();

        let id = self.platform.watch_position(
            Box::new(move |coords| {
                if let Some(tx) = on_update_tx.lock().take() {
                    let _ = tx.send(Ok(coords));
                }
            }),
            Box::new(move |err| {
                if let Some(tx) = on_error_tx.lock().take() {
                    let _ = tx.send(Err(err));
                }
            }),
        );
        let _guard = WatchGuard {
            platform: self.platform.as_ref(),
            id,
        };

        match rx.await {
            Ok(Ok(coords)) => {
                tracing::debug!("platform reported position {}", coords);
                Ok(coords)
            }
            Ok(Err(e)) => {
                tracing::warn!("platform failed to provide a position: {}", e);
                Err(GeoError::acquisition_failed(e.to_string()))
            }
            Err(_) => Err(GeoError::acquisition_failed(
                "position watch ended without a report",
            )),
        }
    }
}
