//! Storage Module
//!
//! This module owns the SQLite connection pool. A single `Storage` is built
//! at startup and handed to every component that touches the database, so
//! there is no global connection state.
//!
//! # Architecture
//!
//! - **`mod.rs`** - `Storage`, connection options, migrations, error
//!   classification
//! - **`unit_of_work`** - `Storage::run`, the transactional unit of work
//!
//! # SQLite Settings
//!
//! - WAL journal mode for file databases (readers never block the writer)
//! - Foreign keys on (deleting a book cascades to its votes)
//! - A busy timeout, so a writer waits for the lock instead of failing
//! - In-memory databases are pinned to one connection; every extra
//!   connection would see an empty database of its own

/// Transactional unit of work
pub mod unit_of_work;

pub use unit_of_work::{TransientError, CONFLICT_RETRIES};

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};

use crate::backend::server::config::DatabaseConfig;

/// Primary SQLite result codes that signal lock contention
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Handle to the application database
#[derive(Clone, Debug)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open the connection pool described by `config`
    ///
    /// # Errors
    ///
    /// Returns the underlying `sqlx::Error` if the URL is malformed or the
    /// first connection cannot be established.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let in_memory = is_in_memory(&config.url);

        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout);
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let max_connections = if in_memory {
            if config.max_connections > 1 {
                tracing::warn!(
                    "In-memory database requested with {} connections; using a single connection",
                    config.max_connections
                );
            }
            1
        } else {
            config.max_connections.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        tracing::info!(
            "Database pool ready ({} max connections, in_memory={})",
            max_connections,
            in_memory
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// The underlying pool, for single-statement reads and writes
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Whether `err` means "another transaction got there first"
///
/// Lock contention (`SQLITE_BUSY`, `SQLITE_LOCKED` and their extended codes)
/// and uniqueness violations are conflicts; a fresh attempt may succeed.
/// Everything else (pool timeouts, I/O, malformed SQL) is not.
pub fn is_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return true;
            }
            db_err
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
                .unwrap_or(false)
        }
        _ => false,
    }
}
