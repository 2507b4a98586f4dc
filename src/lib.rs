//! geo-address Library
//!
//! Locates the user through the platform's geolocation capability, resolves
//! the position to an address through a backend endpoint, and caches both
//! so repeated lookups neither prompt nor hit the network again.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::outbound::{
    CachedAddressApi, CachedGeoLocationService, HttpAddressApi, InMemoryStorage,
    PlatformGeoLocationService, SqliteStorage, StaticGeoPlatform,
};
pub use application::{
    create_address_api, create_geo_location, create_on_focus_handler, AddressApiConfig,
    AddressCallback, AddressLocator, FocusHandler, GeoLocationConfig,
};
pub use config::load_config;
pub use domain::entities::CacheEntry;
pub use domain::errors::GeoError;
pub use domain::ports::{AddressService, CacheStorage, Clock, GeoLocationService, GeoPlatform};
pub use domain::value_objects::{Address, CacheLifetime, Coordinates};
