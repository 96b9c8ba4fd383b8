#![forbid(unsafe_code)]

pub mod catalog;
pub mod mapping;
pub mod repository;
pub mod sqlite;

pub use repository::{
    BlobKey, BlobStore, InMemoryRepository, ProgressRepository, SettingsRepository, Storage,
    StorageError,
};
