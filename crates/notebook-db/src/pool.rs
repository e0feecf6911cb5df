//! Pooled SQLite connections for the page store.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use std::time::Duration;
use thiserror::Error;

/// Shared handle to the page store's connections.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Tunables applied to every pooled connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// How long a writer waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
    pub pool_max_size: u32,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            pool_max_size: 8,
        }
    }
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to open page store at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: r2d2::Error,
    },
}

/// Opens (creating if needed) the database file at `db_path` in WAL mode.
///
/// # Errors
///
/// Returns `PoolError::Open` if no connection can be established.
pub fn create_pool(db_path: &str, settings: DbRuntimeSettings) -> Result<DbPool, PoolError> {
    let busy_timeout = Duration::from_millis(settings.busy_timeout_ms);
    let manager = SqliteConnectionManager::file(db_path)
        .with_flags(
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_FULL_MUTEX,
        )
        .with_init(move |conn| prepare_connection(conn, busy_timeout));

    build(manager, settings.pool_max_size, db_path)
}

/// Opens a throwaway in-memory page store.
///
/// Every `:memory:` connection is a separate database, so the pool holds
/// exactly one connection and callers take turns on it.
pub fn create_memory_pool() -> Result<DbPool, PoolError> {
    let busy_timeout = Duration::from_millis(DbRuntimeSettings::default().busy_timeout_ms);
    let manager =
        SqliteConnectionManager::memory().with_init(move |conn| prepare_connection(conn, busy_timeout));

    build(manager, 1, ":memory:")
}

fn build(manager: SqliteConnectionManager, max_size: u32, path: &str) -> Result<DbPool, PoolError> {
    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|source| PoolError::Open {
            path: path.to_string(),
            source,
        })?;

    tracing::debug!(path, max_size, "opened page store");
    Ok(pool)
}

/// Switches the connection to WAL and sets its busy timeout.
///
/// In-memory databases cannot use WAL and report `memory` instead.
fn prepare_connection(conn: &Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    if mode != "wal" && mode != "memory" {
        return Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
            Some(format!("journal_mode is {mode}, expected wal")),
        ));
    }
    conn.busy_timeout(busy_timeout)
}
