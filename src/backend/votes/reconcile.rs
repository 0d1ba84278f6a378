/**
 * Vote Reconciliation
 *
 * Turns a reader's vote intent into one atomic change of the ledger and the
 * book counters.
 *
 * # Transitions
 *
 * | Current vote | Intent  | likes | dislikes |
 * |--------------|---------|-------|----------|
 * | none         | like    | +1    |  0       |
 * | none         | dislike |  0    | +1       |
 * | like         | dislike | -1    | +1       |
 * | dislike      | like    | +1    | -1       |
 * | like         | like    | rejected (duplicate) |
 * | dislike      | dislike | rejected (duplicate) |
 *
 * There is no transition back to "no vote".
 *
 * # Flow
 *
 * 1. Lock the book row (also proves it exists)
 * 2. Read the reader's current vote
 * 3. Plan the counter deltas
 * 4. Apply the deltas and upsert the ledger row
 * 5. Read the new totals, then commit
 *
 * All five steps run in one `Storage::run` unit of work; any failure rolls
 * all of them back. Nothing is read after the commit, so a vote that
 * committed is never reported as failed.
 */

use sqlx::SqliteConnection;

use crate::backend::storage::Storage;
use crate::backend::votes::counters::{increment_dislikes, increment_likes, lock_book, read_totals};
use crate::backend::votes::error::VoteError;
use crate::backend::votes::ledger::{get_vote, upsert_vote};
use crate::shared::{VoteAction, VoteTotals};

/// Counter changes produced by one vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl VoteDelta {
    /// Totals after applying this delta
    pub fn apply(&self, totals: VoteTotals) -> VoteTotals {
        VoteTotals::new(totals.likes + self.likes, totals.dislikes + self.dislikes)
    }
}

/// Counter deltas for moving from `existing` to `intent`
///
/// # Errors
///
/// `VoteError::DuplicateVote` when the reader already holds `intent`.
pub fn plan(existing: Option<VoteAction>, intent: VoteAction) -> Result<VoteDelta, VoteError> {
    match (existing, intent) {
        (Some(VoteAction::Like), VoteAction::Like) | (Some(VoteAction::Dislike), VoteAction::Dislike) => {
            Err(VoteError::DuplicateVote(intent))
        }
        (Some(VoteAction::Like), VoteAction::Dislike) => Ok(VoteDelta { likes: -1, dislikes: 1 }),
        (Some(VoteAction::Dislike), VoteAction::Like) => Ok(VoteDelta { likes: 1, dislikes: -1 }),
        (None, VoteAction::Like) => Ok(VoteDelta { likes: 1, dislikes: 0 }),
        (None, VoteAction::Dislike) => Ok(VoteDelta { likes: 0, dislikes: 1 }),
    }
}

/// What one committed vote changed, and where it left the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub delta: VoteDelta,
    pub totals: VoteTotals,
}

/// The reconciliation unit of work; must run inside a transaction
pub async fn reconcile(
    conn: &mut SqliteConnection,
    user_id: i64,
    book_id: i64,
    intent: VoteAction,
) -> Result<VoteOutcome, VoteError> {
    if !lock_book(&mut *conn, book_id).await? {
        return Err(VoteError::BookNotFound(book_id));
    }

    let existing = get_vote(&mut *conn, user_id, book_id).await?;
    let delta = plan(existing, intent)?;

    if delta.likes != 0 {
        increment_likes(&mut *conn, book_id, delta.likes).await?;
    }
    if delta.dislikes != 0 {
        increment_dislikes(&mut *conn, book_id, delta.dislikes).await?;
    }
    upsert_vote(&mut *conn, user_id, book_id, intent).await?;

    // The row is locked by this transaction, so it is still there.
    let totals = read_totals(&mut *conn, book_id)
        .await?
        .ok_or(VoteError::BookNotFound(book_id))?;

    Ok(VoteOutcome { delta, totals })
}

/// Apply a reader's vote and return the book's new totals
///
/// # Arguments
///
/// * `storage` - Database handle
/// * `user_id` - Authenticated reader
/// * `book_id` - Book being voted on
/// * `intent` - Like or dislike
///
/// # Errors
///
/// * `DuplicateVote` - the reader already holds `intent`; nothing changes
/// * `BookNotFound` - no such book; nothing changes
/// * `Conflict` - still losing a race after one retry
/// * `StorageUnavailable` - any other database failure
pub async fn cast_vote(
    storage: &Storage,
    user_id: i64,
    book_id: i64,
    intent: VoteAction,
) -> Result<VoteTotals, VoteError> {
    let VoteOutcome { delta, totals } = storage
        .run(|conn| Box::pin(reconcile(conn, user_id, book_id, intent)))
        .await?;

    tracing::debug!(
        "User {} {} book {} (likes {:+}, dislikes {:+})",
        user_id,
        intent.past_tense(),
        book_id,
        delta.likes,
        delta.dislikes
    );

    Ok(totals)
}
