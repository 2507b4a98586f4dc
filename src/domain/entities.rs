//! Domain Entities
//!
//! Records persisted by the caching layer.

use serde::{Deserialize, Serialize};

/// A cached value together with its expiration instant.
///
/// `expires_at` is expressed in milliseconds since the Unix epoch so the
/// entry survives a round-trip through any storage backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: u64,
}

impl<T> CacheEntry<T> {
    /// Wrap a value that expires `ttl_ms` after `now_ms`.
    pub fn new(value: T, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    /// An entry is fresh strictly before its expiration instant.
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
