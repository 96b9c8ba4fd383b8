use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use thiserror::Error;
use tracing::info;

use crate::repository::{Storage, StorageError};

mod blob_repo;
mod migrate;

/// Blob store backed by a single `SQLite` database.
///
/// The connection sits behind a mutex so the repository can be shared as a
/// `Send + Sync` trait object; callers are expected to be single-threaded.
#[derive(Clone)]
pub struct SqliteRepository {
    conn: Arc<Mutex<Connection>>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("sqlite connection lock poisoned")]
    Poisoned,
}

impl SqliteRepository {
    /// Open (or create) the database file at `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the directory or database cannot be opened.
    pub fn open(path: &Path) -> Result<Self, SqliteInitError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;")?;
        info!(path = %path.display(), "opened progress database");
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if `SQLite` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, SqliteInitError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migration statements fail.
    pub fn migrate(&self) -> Result<(), SqliteInitError> {
        let mut conn = self.conn.lock().map_err(|_| SqliteInitError::Poisoned)?;
        migrate::run_migrations(&mut conn)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

impl Storage {
    /// Build a `Storage` backed by the `SQLite` file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connection or migrations cannot be
    /// completed.
    pub fn sqlite(path: &Path) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::open(path)?;
        repo.migrate()?;
        Ok(Self::from_blob_store(repo))
    }
}
