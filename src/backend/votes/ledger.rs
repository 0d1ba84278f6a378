/**
 * Vote Ledger
 *
 * The `votes` table holds at most one row per (user, book): the reader's
 * current vote. The composite primary key enforces that; `upsert_vote`
 * replaces the action in place instead of inserting a second row.
 *
 * All functions take any SQLite executor so they can run on the pool or
 * inside a unit of work.
 */

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::shared::{VoteAction, VoteTotals};

/// The reader's current vote on a book, if any
pub async fn get_vote<'e, E>(
    executor: E,
    user_id: i64,
    book_id: i64,
) -> Result<Option<VoteAction>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let action: Option<String> =
        sqlx::query_scalar("SELECT action FROM votes WHERE user_id = ? AND book_id = ?")
            .bind(user_id)
            .bind(book_id)
            .fetch_optional(executor)
            .await?;

    action
        .map(|raw| {
            raw.parse::<VoteAction>()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))
        })
        .transpose()
}

/// Record `action` as the reader's vote, replacing any previous one
pub async fn upsert_vote<'e, E>(
    executor: E,
    user_id: i64,
    book_id: i64,
    action: VoteAction,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO votes (user_id, book_id, action, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id, book_id)
        DO UPDATE SET action = excluded.action, updated_at = excluded.updated_at
        "#,
    )
    .bind(user_id)
    .bind(book_id)
    .bind(action.as_str())
    .bind(Utc::now().to_rfc3339())
    .execute(executor)
    .await?;

    Ok(())
}

/// Count the ledger rows of a book per action
pub async fn tally<'e, E>(executor: E, book_id: i64) -> Result<VoteTotals, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (likes, dislikes): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN action = 'like' THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN action = 'dislike' THEN 1 ELSE 0 END), 0)
        FROM votes
        WHERE book_id = ?
        "#,
    )
    .bind(book_id)
    .fetch_one(executor)
    .await?;

    Ok(VoteTotals::new(likes, dislikes))
}
