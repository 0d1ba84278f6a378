//! Bookshelf - Main Library
//!
//! Bookshelf is a library-catalog web application built with Rust. Readers
//! browse, search and download books, vote on them with likes and dislikes,
//! ask a small FAQ chatbot for help and receive recommendations from an
//! external service. Administrators manage the catalog and the user base.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared between the server and its clients
//!   - Book and vote wire types
//!   - User roles
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routing and auth extractors
//!   - SQLite storage with a transactional unit of work
//!   - Vote reconciliation (ledger + aggregate counters)
//!   - Catalog, admin, profile, newsletter, recommendations, chatbot
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server build (enabled by default). Pulls in Axum, the
//!   database layer, JWT and bcrypt.
//!
//! # Usage
//!
//! ```rust,no_run
//! use bookshelf::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Vote Consistency
//!
//! Every book carries denormalized `likes`/`dislikes` counters. They are only
//! ever changed by the reconciliation transaction in `backend::votes`, which
//! updates the per-user vote ledger and the counters in one atomic unit of
//! work, so the counters always equal the number of matching ledger rows.
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - Custom error types in `shared::error` and `backend::error`
//! - HTTP errors are plain-text bodies with a meaningful status code

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
