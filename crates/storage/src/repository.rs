use civics_core::model::{AppSettings, ProgressLedger};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::mapping;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Names of the two independently persisted blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKey {
    Settings,
    Progress,
}

impl BlobKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BlobKey::Settings => "civics-settings",
            BlobKey::Progress => "civics-progress",
        }
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw key/value port implemented by every backend.
///
/// Blobs are opaque serialized strings; typed access goes through
/// [`SettingsRepository`] and [`ProgressRepository`].
pub trait BlobStore: Send + Sync {
    /// Read a blob, `Ok(None)` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn read_blob(&self, key: BlobKey) -> Result<Option<String>, StorageError>;

    /// Replace a blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn write_blob(&self, key: BlobKey, data: &str) -> Result<(), StorageError>;
}

/// Repository contract for learner settings.
pub trait SettingsRepository: Send + Sync {
    /// Load persisted settings, `Ok(None)` if none were saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for corrupt data, or backend errors.
    fn load_settings(&self) -> Result<Option<AppSettings>, StorageError>;

    /// Persist settings, replacing the previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

/// Repository contract for the progress ledger.
pub trait ProgressRepository: Send + Sync {
    /// Load the persisted ledger, `Ok(None)` if none was saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for corrupt data, or backend errors.
    fn load_progress(&self) -> Result<Option<ProgressLedger>, StorageError>;

    /// Persist the whole ledger, replacing the previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the ledger cannot be stored.
    fn save_progress(&self, ledger: &ProgressLedger) -> Result<(), StorageError>;
}

impl<T: BlobStore> SettingsRepository for T {
    fn load_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        self.read_blob(BlobKey::Settings)?
            .map(|raw| mapping::decode_settings(&raw))
            .transpose()
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let raw = mapping::encode_settings(settings)?;
        self.write_blob(BlobKey::Settings, &raw)
    }
}

impl<T: BlobStore> ProgressRepository for T {
    fn load_progress(&self) -> Result<Option<ProgressLedger>, StorageError> {
        self.read_blob(BlobKey::Progress)?
            .map(|raw| mapping::decode_progress(&raw))
            .transpose()
    }

    fn save_progress(&self, ledger: &ProgressLedger) -> Result<(), StorageError> {
        let raw = mapping::encode_progress(ledger)?;
        self.write_blob(BlobKey::Progress, &raw)
    }
}

/// In-memory blob store for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what a store persisted.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    blobs: Arc<Mutex<HashMap<BlobKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw blob, e.g. to simulate corrupt persisted data.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, key: BlobKey, raw: impl Into<String>) -> Result<(), StorageError> {
        self.write_blob(key, &raw.into())
    }

    /// Read back a raw blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self, key: BlobKey) -> Result<Option<String>, StorageError> {
        self.read_blob(key)
    }
}

impl BlobStore for InMemoryRepository {
    fn read_blob(&self, key: BlobKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    fn write_blob(&self, key: BlobKey, data: &str) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, data.to_string());
        Ok(())
    }
}

/// Settings and progress repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub settings: Arc<dyn SettingsRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_blob_store(InMemoryRepository::new())
    }

    /// Serve both repositories from one blob store.
    #[must_use]
    pub fn from_blob_store<S: BlobStore + Clone + 'static>(store: S) -> Self {
        let settings: Arc<dyn SettingsRepository> = Arc::new(store.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(store);
        Self { settings, progress }
    }
}
