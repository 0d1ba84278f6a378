//! Votes Module
//!
//! Like/dislike voting on books. This is the one place where book counters
//! change.
//!
//! # Architecture
//!
//! - **`ledger`** - Per-(user, book) vote rows: `get_vote`, `upsert_vote`, `tally`
//! - **`counters`** - Denormalized book totals: `lock_book`, `increment_*`, `read_totals`
//! - **`reconcile`** - `plan` and `cast_vote`, the transactional protocol
//! - **`error`** - `VoteError`
//! - **`handlers`** - HTTP handlers
//!
//! # Invariant
//!
//! For every book, `likes` and `dislikes` equal the number of ledger rows
//! with that action. `cast_vote` keeps it by changing both in one unit of
//! work; deleting a book removes its ledger rows with it.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf::backend::{cast_vote, Storage};
//! use bookshelf::shared::VoteAction;
//!
//! # async fn example(storage: Storage) -> Result<(), bookshelf::backend::VoteError> {
//! let totals = cast_vote(&storage, 1, 42, VoteAction::Like).await?;
//! println!("{} likes, {} dislikes", totals.likes, totals.dislikes);
//! # Ok(())
//! # }
//! ```

/// Vote ledger
pub mod ledger;

/// Aggregate counter store
pub mod counters;

/// Reconciliation transaction
pub mod reconcile;

/// Vote error type
pub mod error;

/// HTTP handlers
pub mod handlers;

pub use error::VoteError;
pub use handlers::{dislike_book, get_votes, like_book};
pub use reconcile::{cast_vote, plan, VoteDelta, VoteOutcome};
