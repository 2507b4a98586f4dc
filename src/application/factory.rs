//! Service Factory
//!
//! Builds the (optionally cached) geolocation and address services from
//! construction-time configuration.

use crate::adapters::outbound::{
    CachedAddressApi, CachedGeoLocationService, HttpAddressApi, InMemoryStorage,
    PlatformGeoLocationService,
};
use crate::domain::errors::GeoError;
use crate::domain::ports::{AddressService, CacheStorage, Clock, GeoLocationService, GeoPlatform};
use crate::domain::value_objects::CacheLifetime;
use std::sync::Arc;

/// Options for `create_geo_location`.
#[derive(Clone)]
pub struct GeoLocationConfig {
    /// Wrap the platform service in the position cache (default: true)
    pub use_cache: bool,
    /// Backend for the cache; `None` means a fresh in-memory storage
    pub cache_storage: Option<Arc<dyn CacheStorage>>,
}

impl Default for GeoLocationConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            cache_storage: None,
        }
    }
}

impl GeoLocationConfig {
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn cache_storage(mut self, storage: Arc<dyn CacheStorage>) -> Self {
        self.cache_storage = Some(storage);
        self
    }
}

/// Options for `create_address_api`.
#[derive(Clone)]
pub struct AddressApiConfig {
    /// Backend endpoint, e.g. `https://example.org/api/address` (required)
    pub api_url: String,
    /// Wrap the HTTP client in the address cache (default: true)
    pub use_cache: bool,
    /// Backend for the cache; `None` means a fresh in-memory storage
    pub cache_storage: Option<Arc<dyn CacheStorage>>,
    /// How long a resolved address stays valid (default: one day)
    pub cache_lifetime: CacheLifetime,
    /// Time source for expiration; `None` means the system clock
    pub clock: Option<Arc<dyn Clock>>,
}

impl AddressApiConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            use_cache: true,
            cache_storage: None,
            cache_lifetime: CacheLifetime::default(),
            clock: None,
        }
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn cache_storage(mut self, storage: Arc<dyn CacheStorage>) -> Self {
        self.cache_storage = Some(storage);
        self
    }

    pub fn cache_lifetime(mut self, lifetime: CacheLifetime) -> Self {
        self.cache_lifetime = lifetime;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), GeoError> {
        if self.api_url.is_empty() {
            return Err(GeoError::Configuration("api url must not be empty".to_string()));
        }
        Ok(())
    }
}

fn storage_or_default(storage: &Option<Arc<dyn CacheStorage>>) -> Arc<dyn CacheStorage> {
    match storage {
        Some(storage) => storage.clone(),
        None => Arc::new(InMemoryStorage::new()),
    }
}

/// Build the geolocation service for `platform`.
pub fn create_geo_location(
    platform: Arc<dyn GeoPlatform>,
    config: &GeoLocationConfig,
) -> Arc<dyn GeoLocationService> {
    let service: Arc<dyn GeoLocationService> = Arc::new(PlatformGeoLocationService::new(platform));
    if !config.use_cache {
        return service;
    }

    let storage = storage_or_default(&config.cache_storage);
    Arc::new(CachedGeoLocationService::new(storage, service))
}

/// Build the address service. Fails when the configuration is invalid.
pub fn create_address_api(config: &AddressApiConfig) -> Result<Arc<dyn AddressService>, GeoError> {
    config.validate()?;
    let api: Arc<dyn AddressService> = Arc::new(HttpAddressApi::new(config.api_url.clone())?);
    if !config.use_cache {
        return Ok(api);
    }

    let storage = storage_or_default(&config.cache_storage);
    let mut cached = CachedAddressApi::new(storage, api).with_cache_lifetime(config.cache_lifetime);
    if let Some(clock) = &config.clock {
        cached = cached.with_clock(clock.clone());
    }
    Ok(Arc::new(cached))
}
