//! SQLite Cache Storage
//!
//! Implements CacheStorage on top of a single SQLite table so cached
//! positions and addresses outlive the process.

use crate::domain::ports::CacheStorage;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// SQLite-backed key-value storage.
///
/// Values are stored as JSON text. Database errors are logged and treated
/// as a cache miss (on read) or a dropped write (on `set`).
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cache_entries (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
             )",
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn write(conn: &Connection, key: &str, value: &Value) -> Result<()> {
        let text = serde_json::to_string(value)?;
        conn.execute(
            "INSERT INTO cache_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, text],
        )?;
        Ok(())
    }

    fn read(conn: &Connection, key: &str) -> Result<Option<Value>> {
        let text: Option<String> = conn
            .query_row(
                "SELECT value FROM cache_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Delete every stored entry.
    pub fn clear(&self) -> Result<usize> {
        let removed = self.conn.lock().execute("DELETE FROM cache_entries", [])?;
        Ok(removed)
    }
}

#[async_trait]
impl CacheStorage for SqliteStorage {
    async fn set(&self, key: &str, value: Value) {
        let conn = self.conn.clone();
        let key = key.to_string();
        let result =
            tokio::task::spawn_blocking(move || Self::write(&conn.lock(), &key, &value)).await;

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("sqlite cache write failed: {:?}", e),
            Err(e) => tracing::error!("spawn_blocking error: {:?}", e),
        }
    }

    async fn get(&self, key: &str) -> Option<Value> {
        let conn = self.conn.clone();
        let key = key.to_string();
        let result = tokio::task::spawn_blocking(move || Self::read(&conn.lock(), &key)).await;

        match result {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                tracing::error!("sqlite cache read failed: {:?}", e);
                None
            }
            Err(e) => {
                tracing::error!("spawn_blocking error: {:?}", e);
                None
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_and_get_in_memory() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage
            .set("em_geo", json!({"value": "Berlin, DE", "expires_at": 10}))
            .await;

        let result = storage.get("em_geo").await;
        assert_eq!(
            result,
            Some(json!({"value": "Berlin, DE", "expires_at": 10}))
        );
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        assert!(storage.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.set("key", json!(1)).await;
        storage.set("key", json!(2)).await;

        assert_eq!(storage.get("key").await, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.db");

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage
                .set("coords", json!({"latitude": 52.5, "longitude": 13.4}))
                .await;
        }

        let reopened = SqliteStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get("coords").await,
            Some(json!({"latitude": 52.5, "longitude": 13.4}))
        );
    }

    #[tokio::test]
    async fn test_clear() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.set("a", json!(1)).await;
        storage.set("b", json!(2)).await;

        assert_eq!(storage.clear().unwrap(), 2);
        assert!(storage.get("a").await.is_none());
    }

    #[test]
    fn test_open_invalid_path_fails() {
        let result = SqliteStorage::open("/nonexistent/dir/cache.db");
        assert!(result.is_err());
    }
}
