//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types describe what travels over the
//! HTTP API and are free of any database or framework dependency.

/// Book catalog types
pub mod book;

/// Vote actions and aggregate totals
pub mod vote;

/// User roles and public user views
pub mod user;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use book::{Book, BookPage, BookUpdate};
pub use error::SharedError;
pub use user::{Role, UserView};
pub use vote::{VoteAction, VoteTotals};
