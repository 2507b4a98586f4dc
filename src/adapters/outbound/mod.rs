mod cached_address_api;
mod cached_geo_location;
mod http_address_api;
mod in_memory_storage;
mod platform_geo_location;
mod sqlite_storage;
mod static_geo_platform;
mod system_clock;

pub use cached_address_api::{CachedAddressApi, ADDRESS_CACHE_KEY};
pub use cached_geo_location::{CachedGeoLocationService, GEO_LOCATION_CACHE_KEY};
pub use http_address_api::HttpAddressApi;
pub use in_memory_storage::InMemoryStorage;
pub use platform_geo_location::PlatformGeoLocationService;
pub use sqlite_storage::SqliteStorage;
pub use static_geo_platform::{PlatformBehavior, StaticGeoPlatform};
pub use system_clock::{ManualClock, SystemClock};
