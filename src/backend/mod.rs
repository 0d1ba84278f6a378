//! Backend Module
//!
//! This module contains all server-side code for the Bookshelf application.
//! It provides a complete Axum HTTP server on top of a SQLite database.
//!
//! # Overview
//!
//! The backend module includes:
//! - Axum HTTP server setup and configuration
//! - SQLite storage with a transactional unit of work
//! - Like/dislike vote reconciliation
//! - Book catalog, uploads and downloads
//! - Authentication (JWT + bcrypt) and admin user management
//! - Profile, newsletter, recommendation proxy and FAQ chatbot
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`storage`** - SQLite pool and the `run` unit of work
//! - **`votes`** - Vote ledger, aggregate counters, reconciliation
//! - **`books`** - Catalog queries and admin book management
//! - **`uploads`** - Upload validation, storage and downloads
//! - **`auth`** - Users, JWT tokens, register/login handlers
//! - **`admin`** - User administration
//! - **`profile`** - Profile editing and profile pictures
//! - **`newsletter`** - Newsletter subscription capture
//! - **`recommendations`** - Proxy to the recommendation service
//! - **`chatbot`** - FAQ pattern matching with optional AI fallback
//! - **`middleware`** - Authentication extractors
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs            - Module exports and documentation
//! ├── server/           - Config, state, init
//! ├── routes/           - Route configuration
//! ├── storage/          - Pool + unit of work
//! ├── votes/            - Vote reconciliation core
//! ├── books/            - Catalog
//! ├── uploads/          - File handling
//! ├── auth/             - Authentication
//! ├── admin/            - User administration
//! ├── profile/          - Profile endpoints
//! ├── newsletter/       - Subscriptions
//! ├── recommendations/  - Recommendation proxy
//! ├── chatbot/          - FAQ chatbot
//! ├── middleware/       - Auth extractors
//! └── error/            - Error types
//! ```
//!
//! # State Management
//!
//! All collaborators (storage handle, token keys, HTTP clients, file
//! locations) are built once in `server::init` and carried in `AppState`.
//! Handlers extract only the piece they need through `FromRef`.
//!
//! # Error Handling
//!
//! - `BackendError` for handler failures, rendered as plain text
//! - `VoteError` for the reconciliation core
//! - Proper error propagation with `?` operator

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Database pool and unit of work
#[cfg(feature = "ssr")]
pub mod storage;

/// Like/dislike reconciliation
#[cfg(feature = "ssr")]
pub mod votes;

/// Book catalog
#[cfg(feature = "ssr")]
pub mod books;

/// Upload validation and file storage
#[cfg(feature = "ssr")]
pub mod uploads;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// User administration
#[cfg(feature = "ssr")]
pub mod admin;

/// Profile endpoints
#[cfg(feature = "ssr")]
pub mod profile;

/// Newsletter subscriptions
#[cfg(feature = "ssr")]
pub mod newsletter;

/// Recommendation service proxy
#[cfg(feature = "ssr")]
pub mod recommendations;

/// FAQ chatbot
#[cfg(feature = "ssr")]
pub mod chatbot;

/// Request extractors for authentication
#[cfg(feature = "ssr")]
pub mod middleware;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

#[cfg(test)]
pub(crate) mod test_support;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use server::create_app;
#[cfg(feature = "ssr")]
pub use storage::Storage;
#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use votes::{cast_vote, VoteError};
