/**
 * Unit of Work
 *
 * `Storage::run` executes a piece of work inside one database transaction.
 * The work receives the transaction's connection; if it returns `Ok` the
 * transaction is committed, otherwise it is rolled back and nothing it
 * wrote becomes visible.
 *
 * # Conflicts
 *
 * Errors report whether they are transient through `TransientError`. A
 * transient failure (lock contention, a uniqueness race) rolls back and the
 * work runs again from scratch, at most `CONFLICT_RETRIES` more times. The
 * work must therefore read everything it depends on inside the transaction.
 *
 * # Example
 *
 * ```rust,no_run
 * use bookshelf::backend::storage::Storage;
 * use sqlx::SqliteConnection;
 *
 * async fn rename(conn: &mut SqliteConnection, id: i64) -> Result<(), sqlx::Error> {
 *     sqlx::query("UPDATE books SET title = 'Renamed' WHERE id = ?")
 *         .bind(id)
 *         .execute(&mut *conn)
 *         .await?;
 *     Ok(())
 * }
 *
 * # async fn example(storage: Storage) -> Result<(), sqlx::Error> {
 * storage.run(|conn| Box::pin(rename(conn, 1))).await
 * # }
 * ```
 */

use futures_util::future::BoxFuture;
use sqlx::SqliteConnection;

use crate::backend::storage::{is_conflict, Storage};

/// How many times a conflicted unit of work is re-run before giving up
pub const CONFLICT_RETRIES: u32 = 1;

/// Errors that can come out of a unit of work
pub trait TransientError: From<sqlx::Error> {
    /// Whether running the same work again might succeed
    fn is_transient(&self) -> bool;
}

impl TransientError for sqlx::Error {
    fn is_transient(&self) -> bool {
        is_conflict(self)
    }
}

impl Storage {
    /// Run `work` in a transaction, committing on `Ok` and rolling back on `Err`
    ///
    /// Transient failures are retried up to `CONFLICT_RETRIES` times; the
    /// last error is returned if every attempt fails.
    pub async fn run<T, E, F>(&self, mut work: F) -> Result<T, E>
    where
        F: for<'c> FnMut(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, E>> + Send,
        T: Send,
        E: TransientError + std::fmt::Display + Send,
    {
        let mut retries = 0;
        loop {
            match self.attempt(&mut work).await {
                Err(err) if err.is_transient() && retries < CONFLICT_RETRIES => {
                    retries += 1;
                    tracing::warn!("Transaction conflict ({}), retrying (attempt {})", err, retries + 1);
                }
                outcome => return outcome,
            }
        }
    }

    async fn attempt<T, E, F>(&self, work: &mut F) -> Result<T, E>
    where
        F: for<'c> FnMut(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, E>> + Send,
        T: Send,
        E: TransientError + Send,
    {
        let mut tx = self.pool().begin().await?;

        match work(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("Failed to roll back transaction: {:?}", rollback_err);
                }
                Err(err)
            }
        }
    }
}
