use std::path::PathBuf;

/// Environment variable naming the `SQLite` file; `:memory:` or unset keeps
/// everything in process memory.
pub const DB_PATH_ENV: &str = "CIVICS_DB_PATH";

const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    InMemory,
    Sqlite(PathBuf),
}

/// Host-level storage selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

impl StorageConfig {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::Sqlite(path.into()),
        }
    }

    /// Read [`DB_PATH_ENV`] from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StorageConfig::from_env`] with an injectable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(DB_PATH_ENV) {
            Some(raw) => {
                let raw = raw.trim();
                if raw.is_empty() || raw == IN_MEMORY {
                    Self::in_memory()
                } else {
                    Self::sqlite(raw)
                }
            }
            None => Self::in_memory(),
        }
    }
}
