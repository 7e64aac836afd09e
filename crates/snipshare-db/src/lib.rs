//! Database layer for snipshare.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! and embedded SQL migrations. Every table in snipshare is created through
//! versioned migrations managed by this crate.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: the whole service is a single process with a
//!   local database file — no external database server required. WAL mode
//!   allows concurrent readers with a single writer, which matches the
//!   read-heavy access pattern of a snippet site.
//! - **`r2d2` connection pool**: bounded connection reuse without manual
//!   lifetime management; request handlers check a connection out per call.
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!`, so the schema ships with the server and cannot drift
//!   from the code that depends on it.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
