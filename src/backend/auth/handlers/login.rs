/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown usernames and wrong passwords get the same 401 response
 * - User passwords are never returned in responses
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenKeys;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::storage::Storage;

const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Login handler
///
/// # Arguments
///
/// * `State(storage)` - Database handle
/// * `State(keys)` - JWT signing keys
/// * `State(hasher)` - Password hasher
/// * `Json(request)` - Username and password
///
/// # Returns
///
/// JSON response with JWT token and user info
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If database query or token generation fails
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "id": 1, "username": "reader", "role": "user", ... }
/// }
/// ```
pub async fn login(
    State(storage): State<Storage>,
    State(keys): State<TokenKeys>,
    State(hasher): State<PasswordHasher>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.username);

    let user = get_user_by_username(storage.pool(), &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.username);
            BackendError::unauthorized(BAD_CREDENTIALS)
        })?;

    if !hasher.verify(&request.password, &user.password_hash).await? {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized(BAD_CREDENTIALS));
    }

    let token = keys.create_token(user.id, &user.username).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("Server error")
    })?;

    tracing::info!("User logged in successfully: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.view(),
    }))
}
