/**
 * Aggregate Counter Store
 *
 * `books.likes` and `books.dislikes` are denormalized totals of the vote
 * ledger. They only ever change through a single-statement
 * `SET likes = likes + ?`, so concurrent writers never lose an update.
 */

use sqlx::{Executor, Sqlite};

use crate::shared::VoteTotals;

/// Take the write lock on a book row; `false` if the book does not exist
///
/// The statement changes nothing, but running it first in a transaction
/// makes SQLite hand that transaction the database write lock before any
/// read, so two reconciliations on the same data cannot both read stale
/// ledger state.
pub async fn lock_book<'e, E>(executor: E, book_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE books SET likes = likes WHERE id = ?")
        .bind(book_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Add `delta` to the like counter
pub async fn increment_likes<'e, E>(executor: E, book_id: i64, delta: i64) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE books SET likes = likes + ? WHERE id = ?")
        .bind(delta)
        .bind(book_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Add `delta` to the dislike counter
pub async fn increment_dislikes<'e, E>(executor: E, book_id: i64, delta: i64) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE books SET dislikes = dislikes + ? WHERE id = ?")
        .bind(delta)
        .bind(book_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Current totals of a book, or `None` if it does not exist
pub async fn read_totals<'e, E>(executor: E, book_id: i64) -> Result<Option<VoteTotals>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<(i64, i64)> = sqlx::query_as("SELECT likes, dislikes FROM books WHERE id = ?")
        .bind(book_id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(|(likes, dislikes)| VoteTotals::new(likes, dislikes)))
}
