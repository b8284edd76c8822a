use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;

pub type SqlitePool = Arc<Pool<SqliteConnectionManager>>;

/// Opens (creating if needed) the SQLite database and applies the schema.
pub fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let manager = SqliteConnectionManager::file(db_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

    let pool = Pool::new(manager).context("failed to create connection pool")?;

    let conn = pool.get()?;
    conn.execute_batch(include_str!("../../data/schema.sql"))
        .context("failed to apply database schema")?;

    Ok(Arc::new(pool))
}

/// In-memory database with the schema applied. The pool is capped at one
/// connection: each in-memory connection would otherwise see its own
/// empty database.
pub fn init_in_memory() -> Result<SqlitePool> {
    let manager = SqliteConnectionManager::memory();
    let pool = Pool::builder().max_size(1).build(manager)?;

    let conn = pool.get()?;
    conn.execute_batch(include_str!("../../data/schema.sql"))
        .context("failed to apply database schema")?;

    Ok(Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_favorites_table() -> Result<()> {
        let pool = init_in_memory()?;
        let conn = pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='favorites'",
            [],
            |row| row.get(0),
        )?;

        assert_eq!(count, 1, "favorites table should exist");
        Ok(())
    }

    #[test]
    fn test_schema_is_idempotent() -> Result<()> {
        let pool = init_in_memory()?;
        let conn = pool.get()?;

        // Applying the schema twice must not fail
        conn.execute_batch(include_str!("../../data/schema.sql"))?;
        Ok(())
    }
}
