//! Vote actions and aggregate totals.
//!
//! A reader's vote on a book is either a like or a dislike. The totals are
//! what the vote endpoints return and what clients render next to a book.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::SharedError;

/// A single vote a reader can hold on a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    Like,
    Dislike,
}

impl VoteAction {
    /// Stored representation in the vote ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// "liked" / "disliked", for user-facing messages
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Like => "liked",
            Self::Dislike => "disliked",
        }
    }

    /// The other action
    pub fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteAction {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(SharedError::validation(
                "action",
                format!("Unknown vote action '{}'", other),
            )),
        }
    }
}

/// Aggregate like/dislike counters of one book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTotals {
    pub likes: i64,
    pub dislikes: i64,
}

impl VoteTotals {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }

    /// Counter for one action
    pub fn count(&self, action: VoteAction) -> i64 {
        match action {
            VoteAction::Like => self.likes,
            VoteAction::Dislike => self.dislikes,
        }
    }
}
