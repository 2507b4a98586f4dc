//! Clock Port
//!
//! Wall-clock source for cache expiration.

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}
