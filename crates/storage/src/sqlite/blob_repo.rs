use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::repository::{BlobKey, BlobStore, StorageError};

use super::SqliteRepository;

fn conn_err(e: rusqlite::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

impl BlobStore for SqliteRepository {
    fn read_blob(&self, key: BlobKey) -> Result<Option<String>, StorageError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT data FROM blobs WHERE key = ?1",
            [key.as_str()],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(conn_err)
    }

    fn write_blob(&self, key: BlobKey, data: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute(
            r"
                INSERT INTO blobs (key, data, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    data = excluded.data,
                    updated_at = excluded.updated_at
            ",
            params![key.as_str(), data, Utc::now().to_rfc3339()],
        )
        .map_err(conn_err)?;
        debug!(%key, bytes = data.len(), "wrote blob");
        Ok(())
    }
}
