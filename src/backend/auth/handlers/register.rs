/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Validate username, password and optional email
 * 2. Hash password using bcrypt
 * 3. Insert the user with the `user` role
 * 4. Return 201 with the created user
 *
 * # Validation
 *
 * - Username: 3-30 chars, starts with a letter, letters/digits/underscore
 * - Password: at least 8 characters
 * - Email (if given): must contain '@'
 * - Username must be unique
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::users::create_user;
use crate::backend::error::BackendError;
use crate::backend::storage::Storage;
use crate::shared::Role;

const USERNAME_RULES: &str =
    "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores";

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Register handler
///
/// # Arguments
///
/// * `State(storage)` - Database handle
/// * `State(hasher)` - Password hasher
/// * `Json(request)` - Username, password and optional email
///
/// # Returns
///
/// `201 Created` with `{message, user}`
///
/// # Errors
///
/// * `400 Bad Request` - Invalid input or username already taken
/// * `500 Internal Server Error` - Hashing or database failure
///
/// # Example Request
///
/// ```http
/// POST /register HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "reader", "password": "securepassword123" }
/// ```
pub async fn register(
    State(storage): State<Storage>,
    State(hasher): State<PasswordHasher>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), BackendError> {
    tracing::info!("Register request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        tracing::warn!("Invalid username format: {}", request.username);
        return Err(BackendError::bad_request(USERNAME_RULES));
    }

    if request.password.len() < 8 {
        tracing::warn!("Password too short");
        return Err(BackendError::bad_request("Password must be at least 8 characters"));
    }

    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty());
    if let Some(email) = email {
        if !email.contains('@') {
            tracing::warn!("Invalid email format: {}", email);
            return Err(BackendError::bad_request("Invalid email format"));
        }
    }

    let password_hash = hasher.hash(&request.password).await?;

    let user = match create_user(storage.pool(), &request.username, &password_hash, Role::User, email).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::warn!("Username already exists: {}", request.username);
            return Err(BackendError::bad_request("Username already exists"));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("User registered successfully: {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: user.view(),
        }),
    ))
}
