//! Key-value storage and the stores built on top of it.
//!
//! All persistent state lives in one `kv` table (key and serialized value),
//! the desktop analog of the original browser storage. The backend is behind
//! the [`KeyValueStore`] trait so every store is testable without touching
//! disk:
//!
//! - [`SqliteStore`] -- the real backend at `~/.config/focusflow/focusflow.db`
//! - [`MemoryStore`] -- in-memory backend for tests and ephemeral use

pub mod chat;
pub mod credentials;
pub mod sessions;
pub mod transfer;

pub use chat::{ChatMessage, ChatRole, ChatStore};
pub use credentials::ApiKeyStore;
pub use sessions::{SessionStore, StudySession};
pub use transfer::{Backup, DataTransfer, ImportSummary};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::error::StorageError;

/// Returns `~/.config/focusflow[-dev]/` based on FOCUSFLOW_ENV.
///
/// Set FOCUSFLOW_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusflow-dev")
    } else {
        base_dir.join("focusflow")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Storage capability every store is written against.
///
/// Values are serialized text; a missing key reads as `None`. Writes follow
/// last-write-wins with no further guarantee.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// SQLite-backed key-value store.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store at `~/.config/focusflow/focusflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("focusflow.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path (tests use a tempdir).
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::QueryFailed("Failed to lock connection".into()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory key-value store.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.values
            .lock()
            .map_err(|_| StorageError::QueryFailed("Failed to lock store".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
