use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

/// Runs the schema migrations in order, skipping versions already applied.
pub(super) fn run_migrations(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    fn is_applied(conn: &Connection, version: i64) -> Result<bool, rusqlite::Error> {
        conn.query_row(
            "SELECT 1 FROM schema_migrations WHERE version = ?1",
            [version],
            |_| Ok(()),
        )
        .optional()
        .map(|row| row.is_some())
    }

    conn.execute_batch(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
        ",
    )?;

    // Version 1: one row per persisted blob.
    if !is_applied(conn, 1)? {
        let tx = conn.transaction()?;
        tx.execute_batch(
            r"
                CREATE TABLE IF NOT EXISTS blobs (
                    key TEXT PRIMARY KEY,
                    data TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )?;
        tx.execute(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
            params![1_i64, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
    }

    Ok(())
}
