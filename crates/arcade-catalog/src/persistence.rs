//! Key-value persistence for favorites and history

use crate::CatalogError;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Narrow durable store consumed by favorites and history
pub trait KeyValueStore {
    /// Read a value; `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, CatalogError>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), CatalogError>;
}

/// Decode a persisted JSON string array; `None` for absent or malformed records
pub(crate) fn read_ids(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<Vec<String>>, CatalogError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => Ok(Some(ids)),
        Err(e) => {
            warn!("Discarding malformed {} record: {}", key, e);
            Ok(None)
        }
    }
}

/// Encode ids as a JSON string array and write them
pub(crate) fn write_ids(
    store: &mut dyn KeyValueStore,
    key: &str,
    ids: &[String],
) -> Result<(), CatalogError> {
    let encoded = serde_json::to_string(ids)?;
    store.set(key, &encoded)?;
    debug!("Persisted {} ({} ids)", key, ids.len());
    Ok(())
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value, bypassing decoding
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CatalogError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CatalogError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), CatalogError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            );
        "#,
        )?;

        Ok(())
    }

    /// Get number of stored keys
    pub fn key_count(&self) -> Result<i64, CatalogError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, CatalogError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CatalogError> {
        self.conn.execute(
            r#"INSERT INTO kv (key, value, updated_at)
               VALUES (?1, ?2, CURRENT_TIMESTAMP)
               ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = CURRENT_TIMESTAMP"#,
            params![key, value],
        )?;
        Ok(())
    }
}
