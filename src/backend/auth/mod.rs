//! Authentication Module
//!
//! This module handles user accounts, password hashing and JWT sessions.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`password`** - bcrypt hashing on the blocking pool
//! - **`sessions`** - JWT token generation and validation (`TokenKeys`)
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── password.rs     - Password hashing
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username + password → user created with the `user` role
//! 2. **Login**: credentials verified → JWT token returned
//! 3. **Requests**: `Authorization: Bearer <token>` → `AuthUser` extractor
//!    verifies the token and re-reads the user row
//!
//! # Seed Admin
//!
//! `ensure_seed_admin` creates the configured admin account at startup if
//! it does not exist yet.

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{check_auth_status, current_user, login, logout, register};
pub use password::{PasswordError, PasswordHasher};
pub use sessions::{Claims, TokenKeys};
pub use users::User;

use crate::backend::error::InitError;
use crate::backend::server::config::SeedAdminConfig;
use crate::backend::storage::Storage;
use crate::shared::Role;

/// Create the seed admin account unless it already exists
///
/// An existing account with the seed username is left untouched, whatever
/// its role.
pub async fn ensure_seed_admin(
    storage: &Storage,
    hasher: &PasswordHasher,
    seed: &SeedAdminConfig,
) -> Result<(), InitError> {
    if users::get_user_by_username(storage.pool(), &seed.username)
        .await?
        .is_some()
    {
        tracing::info!("Admin user already exists.");
        return Ok(());
    }

    let password_hash = hasher.hash(&seed.password).await?;
    match users::create_user(storage.pool(), &seed.username, &password_hash, Role::Admin, None).await {
        Ok(_) => tracing::info!("Admin user '{}' seeded successfully.", seed.username),
        // Another instance seeded it first
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
