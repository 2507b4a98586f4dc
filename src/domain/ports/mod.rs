mod address_service;
mod cache_storage;
mod clock;
mod geo_location;
mod geo_platform;

pub use address_service::AddressService;
pub use cache_storage::CacheStorage;
pub use clock::Clock;
pub use geo_location::GeoLocationService;
pub use geo_platform::{ErrorCallback, GeoPlatform, PlatformError, PositionCallback, WatchId};
