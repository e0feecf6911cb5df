//! Database layer for the notebook service.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization
//! and the embedded migrations that create the `pages` table.
//!
//! Handlers never open connections directly. They check one out of the pool
//! for the duration of a single operation and it returns to the pool when
//! dropped.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_memory_pool, create_pool, DbPool, DbRuntimeSettings, PoolError};
