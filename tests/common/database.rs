//! Database test fixtures
//!
//! `TestDatabase` is a migrated SQLite file in its own temporary directory.
//! A file (rather than `sqlite::memory:`) lets the pool hand out several
//! connections, which the concurrency tests need.

use std::time::Duration;

use bookshelf::backend::books::db::{insert_book, NewBook};
use bookshelf::backend::server::config::DatabaseConfig;
use bookshelf::backend::storage::Storage;
use bookshelf::backend::votes::{counters, ledger};
use bookshelf::shared::VoteTotals;
use tempfile::TempDir;

/// Test database wrapper
pub struct TestDatabase {
    storage: Storage,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a fresh, migrated database
    pub async fn new() -> Self {
        Self::with_connections(8).await
    }

    pub async fn with_connections(max_connections: u32) -> Self {
        Self::with_busy_timeout(max_connections, DatabaseConfig::default().busy_timeout).await
    }

    /// A database whose writers give up on the lock after `busy_timeout`
    pub async fn with_busy_timeout(max_connections: u32, busy_timeout: Duration) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("library.db").display()),
            max_connections,
            busy_timeout,
            ..Default::default()
        };

        let storage = Storage::connect(&config)
            .await
            .expect("Failed to open test database");
        storage.migrate().await.expect("Failed to run migrations");

        Self { storage, _dir: dir }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

/// A minimal book with the given title
pub fn new_book(title: &str) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: "Test Author".to_string(),
        description: "A book used by the test suite".to_string(),
        genres: vec!["Fiction".to_string()],
        summary: None,
        cover: None,
        file: None,
    }
}

/// Insert a book and return its id
pub async fn seed_book(storage: &Storage, title: &str) -> i64 {
    insert_book(storage.pool(), &new_book(title))
        .await
        .expect("Failed to insert book")
}

/// The book's counters
pub async fn counter_totals(storage: &Storage, book_id: i64) -> VoteTotals {
    counters::read_totals(storage.pool(), book_id)
        .await
        .expect("Failed to read counters")
        .expect("Book should exist")
}

/// The totals recomputed from the vote ledger
pub async fn ledger_totals(storage: &Storage, book_id: i64) -> VoteTotals {
    ledger::tally(storage.pool(), book_id)
        .await
        .expect("Failed to tally ledger")
}

/// Insert a plain user row directly and return its id
pub async fn seed_user(storage: &Storage, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, password_hash, role, created_at) \
         VALUES (?, 'not-a-real-hash', 'user', '2024-01-01T00:00:00Z') RETURNING id",
    )
    .bind(username)
    .fetch_one(storage.pool())
    .await
    .expect("Failed to insert user")
}

/// Open a transaction that holds the database write lock until it is dropped
pub async fn hold_write_lock(storage: &Storage) -> sqlx::Transaction<'static, sqlx::Sqlite> {
    let mut tx = storage.pool().begin().await.expect("Failed to begin blocker");
    sqlx::query("UPDATE books SET title = title")
        .execute(&mut *tx)
        .await
        .expect("Failed to take the write lock");
    tx
}
