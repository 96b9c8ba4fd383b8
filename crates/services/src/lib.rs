#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod progress_store;
pub mod selection;
pub mod sessions;
pub mod settings_store;

pub use civics_core::Clock;

pub use app_services::AppServices;
pub use config::{StorageBackend, StorageConfig};
pub use error::{AppServicesError, SessionError};
pub use progress_store::ProgressStore;
pub use settings_store::SettingsStore;

pub use sessions::{
    SessionConfig, SessionEngine, SessionMode, SessionOutcome, SessionPhase, SessionProgress,
    SessionResults,
};
