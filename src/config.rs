use crate::domain::errors::GeoError;
use crate::domain::value_objects::{CacheLifetime, Coordinates};

#[derive(Debug, Clone)]
pub struct Config {
    // Address backend
    pub api_url: String,

    // Caching
    pub use_cache: bool,
    pub cache_lifetime: CacheLifetime,
    pub storage_path: Option<String>,

    // Position reported by the static platform (None = no geolocation)
    pub position: Option<Coordinates>,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            use_cache: true,
            cache_lifetime: CacheLifetime::default(),
            storage_path: None,
            position: None,
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Build the configuration from an arbitrary variable lookup.
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let api_url = var("GEOADDR_API_URL").unwrap_or_default();

    let use_cache = var("GEOADDR_USE_CACHE")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(true);

    let cache_lifetime = match var("GEOADDR_CACHE_LIFETIME_MS") {
        Some(v) => CacheLifetime::parse(&v)?,
        None => CacheLifetime::default(),
    };

    let storage_path = var("GEOADDR_STORAGE_PATH").filter(|p| !p.is_empty());

    let position = match (var("GEOADDR_LATITUDE"), var("GEOADDR_LONGITUDE")) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(
            parse_degrees("GEOADDR_LATITUDE", &lat)?,
            parse_degrees("GEOADDR_LONGITUDE", &lon)?,
        )),
        (None, None) => None,
        _ => {
            return Err(GeoError::Configuration(
                "GEOADDR_LATITUDE and GEOADDR_LONGITUDE must be set together".to_string(),
            )
            .into())
        }
    };

    let debug = var("DEBUG").is_some();

    Ok(Config {
        api_url,
        use_cache,
        cache_lifetime,
        storage_path,
        position,
        debug,
    })
}

fn parse_degrees(name: &str, value: &str) -> Result<f64, GeoError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeoError::Configuration(format!("{} is not a number: {:?}", name, value)))
}
