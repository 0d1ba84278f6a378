//! Middleware Module
//!
//! Request processing that runs before handlers. Authentication is done with
//! extractors rather than a layer, so each handler states the access level
//! it needs in its signature.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf::backend::middleware::AdminUser;
//!
//! async fn delete_everything(AdminUser(admin): AdminUser) -> String {
//!     format!("{} is an admin", admin.username)
//! }
//! ```

pub mod auth;

pub use auth::{AdminUser, AuthUser, SeedAdmin, SeedAdminName};
