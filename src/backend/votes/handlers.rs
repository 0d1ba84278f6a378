/**
 * Vote Handlers
 *
 * HTTP handlers for the like/dislike endpoints and the aggregate read path.
 *
 * # Routes
 *
 * - `POST /books/{id}/like` - Like a book (requires authentication)
 * - `POST /books/{id}/dislike` - Dislike a book (requires authentication)
 * - `GET /books/{id}/votes` - Current totals
 *
 * # Responses
 *
 * Success returns `{"likes": n, "dislikes": m}`. Errors are plain text:
 *
 * - `400` - "You have already liked this book" / "... disliked ..."
 * - `401` - not logged in (the vote core never runs)
 * - `404` - "Book not found"
 * - `500` - storage failure; conflicts also carry `Retry-After`
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::storage::Storage;
use crate::backend::votes::counters::read_totals;
use crate::backend::votes::error::VoteError;
use crate::backend::votes::reconcile::cast_vote;
use crate::shared::{VoteAction, VoteTotals};

async fn vote(
    storage: &Storage,
    user: &AuthUser,
    book_id: i64,
    intent: VoteAction,
) -> Result<Json<VoteTotals>, BackendError> {
    match cast_vote(storage, user.id, book_id, intent).await {
        Ok(totals) => {
            tracing::info!("{} {} book {}", user.username, intent.past_tense(), book_id);
            Ok(Json(totals))
        }
        Err(err @ VoteError::DuplicateVote(_)) => {
            tracing::warn!("Duplicate {} from {} on book {}", intent, user.username, book_id);
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Like handler
///
/// # Arguments
///
/// * `user` - Authenticated reader (401 if missing)
/// * `State(storage)` - Database handle
/// * `Path(book_id)` - Book to like
///
/// # Returns
///
/// The book's totals after the vote
pub async fn like_book(
    user: AuthUser,
    State(storage): State<Storage>,
    Path(book_id): Path<i64>,
) -> Result<Json<VoteTotals>, BackendError> {
    vote(&storage, &user, book_id, VoteAction::Like).await
}

/// Dislike handler; see [`like_book`]
pub async fn dislike_book(
    user: AuthUser,
    State(storage): State<Storage>,
    Path(book_id): Path<i64>,
) -> Result<Json<VoteTotals>, BackendError> {
    vote(&storage, &user, book_id, VoteAction::Dislike).await
}

/// Current totals of a book
pub async fn get_votes(
    State(storage): State<Storage>,
    Path(book_id): Path<i64>,
) -> Result<Json<VoteTotals>, BackendError> {
    read_totals(storage.pool(), book_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("Book not found"))
}
