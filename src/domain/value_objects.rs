//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use crate::domain::errors::GeoError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Geographic position reported by the platform.
///
/// The default value (`0.0`, `0.0`) stands for "unknown location" and is
/// what the caching layer falls back to when acquisition fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether this is the "unknown location" placeholder.
    pub fn is_unknown(&self) -> bool {
        *self == Self::default()
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Human-readable address resolved by the backend.
///
/// The backend contract is "always a string": an empty address means the
/// lookup did not succeed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The failure marker.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Time-to-live for cached addresses, in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheLifetime(u64);

impl CacheLifetime {
    /// One day.
    pub const DEFAULT_MILLIS: u64 = 24 * 60 * 60 * 1000;

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Parse a textual millisecond count. Only non-negative integers are
    /// accepted.
    pub fn parse(value: &str) -> Result<Self, GeoError> {
        value.trim().parse::<u64>().map(Self).map_err(|_| {
            GeoError::Configuration(format!(
                "cache lifetime must be a non-negative integer, got {:?}",
                value
            ))
        })
    }
}

impl Default for CacheLifetime {
    fn default() -> Self {
        Self(Self::DEFAULT_MILLIS)
    }
}

impl TryFrom<i64> for CacheLifetime {
    type Error = GeoError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value).map(Self).map_err(|_| {
            GeoError::Configuration(format!(
                "cache lifetime must not be negative, got {}",
                value
            ))
        })
    }
}

/// Untyped configuration values (e.g. a JSON settings object) must carry an
/// integer number, not a string or a float.
impl TryFrom<&serde_json::Value> for CacheLifetime {
    type Error = GeoError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value.as_u64() {
            Some(millis) => Ok(Self(millis)),
            None => Err(GeoError::Configuration(format!(
                "wrong type of the cache lifetime: {}",
                value
            ))),
        }
    }
}
