//! Cached Address API
//!
//! Decorates any AddressService with a time-bounded, single-key cache.

use crate::adapters::outbound::SystemClock;
use crate::domain::entities::CacheEntry;
use crate::domain::errors::GeoError;
use crate::domain::ports::{AddressService, CacheStorage, Clock};
use crate::domain::value_objects::{Address, CacheLifetime, Coordinates};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage key for the last resolved address.
pub const ADDRESS_CACHE_KEY: &str = "em_geo";

/// Caching decorator for address lookups.
///
/// Holds exactly one entry, regardless of the coordinates asked for. An
/// entry is served while `now < expires_at`; expired or unreadable entries
/// are refreshed from the wrapped service. A `RemoteFailure` from the wrapped
/// service is stored as an empty address for the usual lifetime.
pub struct CachedAddressApi {
    storage: Arc<dyn CacheStorage>,
    inner: Arc<dyn AddressService>,
    clock: Arc<dyn Clock>,
    cache_key: String,
    cache_lifetime: CacheLifetime,
}

impl CachedAddressApi {
    pub fn new(storage: Arc<dyn CacheStorage>, inner: Arc<dyn AddressService>) -> Self {
        Self {
            storage,
            inner,
            clock: Arc::new(SystemClock),
            cache_key: ADDRESS_CACHE_KEY.to_string(),
            cache_lifetime: CacheLifetime::default(),
        }
    }

    pub fn with_cache_lifetime(mut self, lifetime: CacheLifetime) -> Self {
        self.cache_lifetime = lifetime;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    pub fn cache_lifetime(&self) -> CacheLifetime {
        self.cache_lifetime
    }

    pub fn set_cache_lifetime(&mut self, lifetime: CacheLifetime) {
        self.cache_lifetime = lifetime;
    }

    async fn fresh_entry(&self, now: u64) -> Option<Address> {
        let value = self.storage.get(&self.cache_key).await?;
        let entry: CacheEntry<Address> = serde_json::from_value(value)
            .map_err(|e| tracing::debug!("ignoring malformed cached address: {}", e))
            .ok()?;

        if entry.is_fresh(now) {
            Some(entry.into_value())
        } else {
            tracing::debug!("cached address expired at {}", entry.expires_at);
            None
        }
    }
}

#[async_trait]
impl AddressService for CachedAddressApi {
    async fn resolve_address(&self, coords: &Coordinates) -> Result<Address, GeoError> {
        if !coords.is_finite() {
            return Err(GeoError::InvalidInput(format!(
                "coordinates must be finite numbers, got {}",
                coords
            )));
        }

        if let Some(address) = self.fresh_entry(self.clock.now_millis()).await {
            tracing::debug!("using cached address {:?}", address.as_str());
            return Ok(address);
        }

        let address = match self.inner.resolve_address(coords).await {
            Ok(address) => address,
            Err(GeoError::RemoteFailure(reason)) => {
                tracing::warn!("address lookup for {} failed: {}", coords, reason);
                Address::empty()
            }
            Err(e) => return Err(e),
        };

        let entry = CacheEntry::new(
            address.clone(),
            self.clock.now_millis(),
            self.cache_lifetime.as_millis(),
        );
        match serde_json::to_value(&entry) {
            Ok(value) => self.storage.set(&self.cache_key, value).await,
            Err(e) => tracing::warn!("address not cached: {}", e),
        }

        Ok(address)
    }
}
