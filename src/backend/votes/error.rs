/**
 * Vote Errors
 *
 * Every failure of the reconciliation transaction is one of four kinds:
 *
 * - `DuplicateVote` - the reader already holds this vote; not retried
 * - `BookNotFound` - nothing to vote on
 * - `Conflict` - lost a race for the SQLite lock or a uniqueness check;
 *   retried once by the unit of work, then surfaced as retryable
 * - `StorageUnavailable` - any other database failure; not retried
 *
 * Whatever the kind, the transaction has been rolled back by the time the
 * error is observed.
 */

use thiserror::Error;

use crate::backend::storage::{is_conflict, TransientError};
use crate::shared::VoteAction;

/// Failure of a `cast_vote` call
#[derive(Debug, Error)]
pub enum VoteError {
    /// The reader already holds exactly this vote on the book
    #[error("You have already {} this book", .0.past_tense())]
    DuplicateVote(VoteAction),

    /// No book with this id
    #[error("Book not found")]
    BookNotFound(i64),

    /// Lost a race with a concurrent transaction
    #[error("vote conflicted with a concurrent update: {0}")]
    Conflict(#[source] sqlx::Error),

    /// The database could not complete the transaction
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[source] sqlx::Error),
}

impl VoteError {
    /// Whether the client may usefully send the same request again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<sqlx::Error> for VoteError {
    fn from(err: sqlx::Error) -> Self {
        if is_conflict(&err) {
            Self::Conflict(err)
        } else {
            Self::StorageUnavailable(err)
        }
    }
}

impl TransientError for VoteError {
    fn is_transient(&self) -> bool {
        self.is_retryable()
    }
}
