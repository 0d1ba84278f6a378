//! Admin Module
//!
//! User administration endpoints.
//!
//! # Access Levels
//!
//! - `GET /users`, `DELETE /users/{id}` - any admin (`AdminUser`)
//! - `POST /users/{id}/grant-admin`, `POST /users/{id}/revoke-admin` - the
//!   seeded admin only (`SeedAdmin`)

pub mod handlers;

pub use handlers::{delete_user, grant_admin, list_users, revoke_admin};
