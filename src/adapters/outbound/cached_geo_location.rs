//! Cached Geolocation Service
//!
//! Decorates any GeoLocationService with a storage-backed cache so the
//! permission prompt is shown at most once per storage lifetime.

use crate::domain::errors::GeoError;
use crate::domain::ports::{CacheStorage, GeoLocationService};
use crate::domain::value_objects::Coordinates;
use async_trait::async_trait;
use std::sync::Arc;

/// Storage key for the last known position.
pub const GEO_LOCATION_CACHE_KEY: &str = "44a34afa-a15f-4488-8398-be92e520144e";

/// Caching decorator for geolocation.
///
/// A stored position never expires. When the wrapped service fails, the
/// "unknown location" placeholder is stored and returned instead, so a
/// single denied prompt pins the placeholder until the storage is cleared.
pub struct CachedGeoLocationService {
    storage: Arc<dyn CacheStorage>,
    inner: Arc<dyn GeoLocationService>,
    cache_key: String,
}

impl CachedGeoLocationService {
    pub fn new(storage: Arc<dyn CacheStorage>, inner: Arc<dyn GeoLocationService>) -> Self {
        Self {
            storage,
            inner,
            cache_key: GEO_LOCATION_CACHE_KEY.to_string(),
        }
    }

    /// Use a different storage key (e.g. to scope the cache per user).
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    async fn cached(&self) -> Option<Coordinates> {
        let value = self.storage.get(&self.cache_key).await?;
        match serde_json::from_value(value) {
            Ok(coords) => Some(coords),
            Err(e) => {
                tracing::debug!("ignoring malformed cached position: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl GeoLocationService for CachedGeoLocationService {
    fn is_supported(&self) -> bool {
        self.inner.is_supported()
    }

    async fn determine_position(&self) -> Result<Coordinates, GeoError> {
        if let Some(coords) = self.cached().await {
            tracing::debug!("using cached position {}", coords);
            return Ok(coords);
        }

        let coords = match self.inner.determine_position().await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!("falling back to unknown location: {}", e);
                Coordinates::default()
            }
        };

        match serde_json::to_value(coords) {
            Ok(value) => self.storage.set(&self.cache_key, value).await,
            Err(e) => tracing::warn!("position not cached: {}", e),
        }

        Ok(coords)
    }
}
