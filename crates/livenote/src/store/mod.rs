//! Persistence layer for livenote.
//!
//! A `SQLite`-backed key-value store of the five logical state records,
//! with defensive rehydration: one corrupt record falls back to its
//! default without disturbing the others.

pub mod migrations;
pub mod schema;
mod snapshot;

pub use snapshot::Snapshot;

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Logical record keys, matching the original storage contract.
pub mod keys {
    /// The transient stream name being edited.
    pub const STREAM_NAME: &str = "streamName";
    /// The working note log (JSON array of notes).
    pub const NOTES: &str = "notes";
    /// The stopwatch's elapsed seconds (stringified integer).
    pub const SECONDS: &str = "seconds";
    /// The archive (JSON array of streams).
    pub const ARCHIVED_STREAMS: &str = "archivedStreams";
    /// The currently selected archived stream (Stream JSON or null).
    pub const SELECTED_STREAM: &str = "selectedStream";
}

/// Key-value string store holding the application's persisted state.
#[derive(Debug)]
pub struct StateStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl StateStore {
    /// Open or create a state store at the given path.
    ///
    /// Creates the parent directories and database file if they don't
    /// exist, and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening state database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::StoreOpen {
            path: path.clone(),
            source,
        })?;

        // WAL keeps concurrent readers (e.g. a status command) cheap.
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("State database ready at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::StoreOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a record's raw string value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM state WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Write a record, replacing any previous value for the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO state (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            (key, value),
        )?;
        Ok(())
    }

    /// Remove a record. Returns `true` if a record was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM state WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// Serialize a value as JSON and write it under the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn put_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.put(key, &json)
    }

    /// Number of records currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM state", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> StateStore {
        StateStore::open_in_memory().expect("failed to create test store")
    }

    #[test]
    fn test_open_in_memory() {
        assert!(StateStore::open_in_memory().is_ok());
    }

    #[test]
    fn test_get_missing_key() {
        let store = create_test_store();
        assert_eq!(store.get("absent").unwrap(), None);
    }

    #[test]
    fn test_put_and_get() {
        let store = create_test_store();
        store.put(keys::STREAM_NAME, "\"Friday VOD\"").unwrap();
        assert_eq!(
            store.get(keys::STREAM_NAME).unwrap(),
            Some("\"Friday VOD\"".to_string())
        );
    }

    #[test]
    fn test_put_replaces_existing() {
        let store = create_test_store();
        store.put(keys::SECONDS, "1").unwrap();
        store.put(keys::SECONDS, "2").unwrap();

        assert_eq!(store.get(keys::SECONDS).unwrap(), Some("2".to_string()));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_delete() {
        let store = create_test_store();
        store.put("doomed", "x").unwrap();

        assert!(store.delete("doomed").unwrap());
        assert_eq!(store.get("doomed").unwrap(), None);
        assert!(!store.delete("doomed").unwrap());
    }

    #[test]
    fn test_put_json() {
        let store = create_test_store();
        store.put_json(keys::SECONDS, &42u64).unwrap();
        assert_eq!(store.get(keys::SECONDS).unwrap(), Some("42".to_string()));

        store
            .put_json(keys::NOTES, &vec!["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(
            store.get(keys::NOTES).unwrap(),
            Some("[\"a\",\"b\"]".to_string())
        );
    }

    #[test]
    fn test_count() {
        let store = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
        store.put("one", "1").unwrap();
        store.put("two", "2").unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_path() {
        let store = create_test_store();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_unicode_values() {
        let store = create_test_store();
        store.put("unicode", "\"мир 世界 🌍\"").unwrap();
        assert_eq!(
            store.get("unicode").unwrap(),
            Some("\"мир 世界 🌍\"".to_string())
        );
    }

    #[test]
    fn test_open_file_based() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("livenote_store_test_{}.db", std::process::id()));

        let store = StateStore::open(&db_path).unwrap();
        store.put("persisted", "value").unwrap();
        assert_eq!(store.path(), db_path);
        drop(store);

        // Reopen and read back.
        let store = StateStore::open(&db_path).unwrap();
        assert_eq!(store.get("persisted").unwrap(), Some("value".to_string()));

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let nested_path = temp_dir.join(format!(
            "livenote_store_test_{}/nested/state.db",
            std::process::id()
        ));

        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let store = StateStore::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(store);
        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent.parent().unwrap());
        }
    }
}
