use civics_core::QuestionCatalog;
use civics_core::stats::ProgressStats;
use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;
use crate::sessions::{SessionConfig, SessionEngine};
use crate::settings_store::SettingsStore;

/// Owns the catalog and both durable stores for the lifetime of the app.
///
/// Built once by the host and passed by reference to whatever needs it.
pub struct AppServices {
    catalog: QuestionCatalog,
    settings: SettingsStore,
    progress: ProgressStore,
}

impl AppServices {
    /// Open the configured backend and load settings and progress.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the `SQLite` database cannot be opened
    /// or migrated.
    pub fn open(catalog: QuestionCatalog, config: &StorageConfig) -> Result<Self, AppServicesError> {
        let storage = match &config.backend {
            StorageBackend::InMemory => Storage::in_memory(),
            StorageBackend::Sqlite(path) => Storage::sqlite(path)?,
        };
        Ok(Self::with_storage(catalog, storage, Clock::system()))
    }

    #[must_use]
    pub fn with_storage(catalog: QuestionCatalog, storage: Storage, clock: Clock) -> Self {
        let settings = SettingsStore::load(storage.settings);
        let progress = ProgressStore::load(storage.progress, clock);
        info!(
            questions = catalog.len(),
            tracked = progress.ledger().len(),
            "app services ready"
        );
        Self {
            catalog,
            settings,
            progress,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.progress
    }

    /// Progress summary over the whole catalog.
    #[must_use]
    pub fn stats(&self) -> ProgressStats {
        self.progress.stats(self.catalog.len())
    }

    /// Practice preset honoring the current 65/20 toggle.
    #[must_use]
    pub fn practice_config(&self, question_count: usize) -> SessionConfig {
        SessionConfig::practice(question_count, self.settings.flagged_only())
    }

    /// Exam preset honoring the current 65/20 toggle.
    #[must_use]
    pub fn exam_config(&self) -> SessionConfig {
        SessionConfig::exam(self.settings.flagged_only())
    }

    /// A fresh engine in Setup for `config`.
    #[must_use]
    pub fn new_session(&self, config: SessionConfig) -> SessionEngine {
        SessionEngine::new(config)
    }
}
