//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;

use crate::sessions::SessionPhase;

/// Errors emitted by the session engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("session is {actual}, expected {expected}")]
    InvalidPhase {
        expected: SessionPhase,
        actual: SessionPhase,
    },
    #[error("session already completed")]
    Completed,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
