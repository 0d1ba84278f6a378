/**
 * Authentication Extractors
 *
 * Request extractors for routes that require a logged-in user. They read
 * the JWT token from the Authorization header, verify it, and re-read the
 * user row so that deleted accounts and role changes take effect on the
 * very next request.
 *
 * - `AuthUser` - any logged-in user (401 otherwise)
 * - `AdminUser` - a user with the admin role (403 otherwise)
 * - `SeedAdmin` - the seeded admin account itself (403 otherwise)
 */

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::auth::sessions::TokenKeys;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::storage::Storage;
use crate::shared::Role;

const NOT_LOGGED_IN: &str = "You must be logged in to perform this action.";
const NOT_ADMIN: &str = "Only admin can perform this action.";
const NOT_SEED_ADMIN: &str = "Only the seeded admin can perform this action.";

/// Username of the account created at startup
#[derive(Clone, Debug)]
pub struct SeedAdminName(pub Arc<str>);

/// Authenticated user extracted from the request
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// An authenticated user holding the admin role
#[derive(Clone, Debug)]
pub struct AdminUser(pub AuthUser);

/// The seeded admin account
#[derive(Clone, Debug)]
pub struct SeedAdmin(pub AuthUser);

/// Extract the token from a `Bearer <token>` header value
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Storage: FromRef<S>,
    TokenKeys: FromRef<S>,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            BackendError::unauthorized(NOT_LOGGED_IN)
        })?;

        let keys = TokenKeys::from_ref(state);
        let claims = keys.verify_token(token).map_err(|e| {
            tracing::warn!("Invalid token: {:?}", e);
            BackendError::unauthorized(NOT_LOGGED_IN)
        })?;

        let user_id = claims.user_id().ok_or_else(|| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            BackendError::unauthorized(NOT_LOGGED_IN)
        })?;

        let storage = Storage::from_ref(state);
        let user = get_user_by_id(storage.pool(), user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Token for unknown user {}", user_id);
                BackendError::unauthorized(NOT_LOGGED_IN)
            })?;

        Ok(AuthUser {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Storage: FromRef<S>,
    TokenKeys: FromRef<S>,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            tracing::warn!("Non-admin {} attempted an admin action", user.username);
            return Err(BackendError::forbidden(NOT_ADMIN));
        }
        Ok(AdminUser(user))
    }
}

impl<S> FromRequestParts<S> for SeedAdmin
where
    S: Send + Sync,
    Storage: FromRef<S>,
    TokenKeys: FromRef<S>,
    SeedAdminName: FromRef<S>,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let SeedAdminName(seed) = SeedAdminName::from_ref(state);
        if user.username != *seed {
            tracing::warn!("{} attempted a seed-admin action", user.username);
            return Err(BackendError::forbidden(NOT_SEED_ADMIN));
        }
        Ok(SeedAdmin(user))
    }
}
