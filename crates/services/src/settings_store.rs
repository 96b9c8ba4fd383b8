use std::sync::Arc;

use civics_core::model::{AppSettings, DynamicAnswers, DynamicField};
use storage::repository::SettingsRepository;
use tracing::{debug, warn};

/// Durable learner settings: the 65/20 toggle and current office holders.
///
/// Same recovery rules as [`crate::ProgressStore`]: defaults on load
/// failure, logged-and-ignored write failures.
pub struct SettingsStore {
    settings: AppSettings,
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsStore {
    #[must_use]
    pub fn load(repo: Arc<dyn SettingsRepository>) -> Self {
        let settings = match repo.load_settings() {
            Ok(Some(settings)) => settings,
            Ok(None) => AppSettings::default(),
            Err(err) => {
                warn!(error = %err, "settings could not be loaded; using defaults");
                AppSettings::default()
            }
        };
        Self { settings, repo }
    }

    #[must_use]
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    #[must_use]
    pub fn flagged_only(&self) -> bool {
        self.settings.flagged_only()
    }

    #[must_use]
    pub fn dynamic_answers(&self) -> &DynamicAnswers {
        self.settings.dynamic_answers()
    }

    pub fn set_flagged_only(&mut self, flagged_only: bool) {
        self.settings.set_flagged_only(flagged_only);
        self.persist();
    }

    pub fn set_dynamic_answer(&mut self, field: DynamicField, value: impl Into<String>) {
        self.settings.set_dynamic_answer(field, value);
        self.persist();
    }

    /// Merge several values at once; fields not mentioned keep their value.
    pub fn update_dynamic_answers(
        &mut self,
        values: impl IntoIterator<Item = (DynamicField, String)>,
    ) {
        self.settings.update_dynamic_answers(values);
        self.persist();
    }

    pub fn reset_dynamic_answers(&mut self) {
        self.settings.reset_dynamic_answers();
        self.persist();
    }

    fn persist(&self) {
        match self.repo.save_settings(&self.settings) {
            Ok(()) => debug!("settings persisted"),
            Err(err) => warn!(error = %err, "failed to persist settings; keeping in-memory state"),
        }
    }
}
