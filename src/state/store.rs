use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the local key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("local store query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The LocalStore is a flat key -> string table kept in SQLite.
/// It plays the part of the browser's local storage: each key holds
/// one opaque value (usually a JSON document) and nothing more.
pub struct LocalStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl LocalStore {
    /// Open (or create) the store at `db_path`.
    ///
    /// The default location comes from `AppConfig`:
    /// - Linux: ~/.local/share/merge-lucky/local_store.db
    /// - macOS: ~/Library/Application Support/merge-lucky/local_store.db
    /// - Windows: %APPDATA%\merge-lucky\local_store.db
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(db_path)?;
        tracing::info!("📁 Local store opened at: {}", db_path.display());

        let store = LocalStore {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a throwaway store that lives only as long as this value
    pub fn in_memory() -> Result<Self, StoreError> {
        let store = LocalStore {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Path to the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Read the value stored under `key`
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite the value stored under `key`
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    /// Delete `key`; returns whether anything was removed
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let changed = self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(changed > 0)
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
