//! In-Memory Cache Storage
//!
//! Implements CacheStorage using DashMap for lock-free concurrent access.
//! Contents live as long as the process; use `SqliteStorage` when cached
//! values must survive a restart.

use crate::domain::ports::CacheStorage;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// DashMap-backed key-value storage.
///
/// Cloning shares the underlying map, so several services can be handed
/// the same storage.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<DashMap<String, Value>>,
}

impl InMemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a single key.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.entries.remove(key).map(|(_, v)| v)
    }

    /// Drop every cached value.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStorage for InMemoryStorage {
    async fn set(&self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    async fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|e| e.value().clone())
    }
}
