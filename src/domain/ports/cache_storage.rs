//! Cache Storage Port
//!
//! Defines the key-value contract the caching decorators persist through.

use async_trait::async_trait;
use serde_json::Value;

/// Key-value store used by the caching decorators.
///
/// This is an outbound port. Values round-trip exactly as stored; the
/// contract has no error channel, so backends that can fail must log and
/// degrade to "absent" on read and to a dropped write on `set`.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Store a value under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value);

    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Option<Value>;
}
