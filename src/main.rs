//! geo-address - locate, resolve, cache
//!
//! This is the composition root that wires together all the components.
//! The position comes from configuration through the static platform; a
//! real deployment plugs its own `GeoPlatform` in the same place.

use geo_address::adapters::outbound::{InMemoryStorage, SqliteStorage, StaticGeoPlatform};
use geo_address::application::{
    create_on_focus_handler, AddressApiConfig, AddressCallback, GeoLocationConfig,
};
use geo_address::domain::ports::{CacheStorage, GeoPlatform};
use geo_address::load_config;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting geo-address api_url={} use_cache={} cache_lifetime_ms={}",
        cfg.api_url,
        cfg.use_cache,
        cfg.cache_lifetime.as_millis()
    );

    // ===== COMPOSITION ROOT =====

    // 1. Cache storage (SQLite when a path is configured, memory otherwise),
    //    shared by both caches
    let storage: Arc<dyn CacheStorage> = match &cfg.storage_path {
        Some(path) => {
            let storage = SqliteStorage::open(path)?;
            tracing::info!("cache storage opened at {}", path);
            Arc::new(storage)
        }
        None => Arc::new(InMemoryStorage::new()),
    };

    // 2. Geolocation platform
    let platform: Arc<dyn GeoPlatform> = match cfg.position {
        Some(coords) => Arc::new(StaticGeoPlatform::fixed(coords)),
        None => Arc::new(StaticGeoPlatform::unsupported()),
    };

    // 3. Service chain
    let geo_config = GeoLocationConfig::default()
        .use_cache(cfg.use_cache)
        .cache_storage(storage.clone());
    let address_config = AddressApiConfig::new(cfg.api_url.clone())
        .use_cache(cfg.use_cache)
        .cache_storage(storage)
        .cache_lifetime(cfg.cache_lifetime);

    let callback: AddressCallback = Arc::new(|address| println!("{}", address));
    let handler =
        create_on_focus_handler(platform, &geo_config, &address_config, Some(callback))?;

    if !handler.is_active() {
        tracing::warn!("no position configured, nothing to resolve");
    }

    handler.handle().await;
    Ok(())
}
