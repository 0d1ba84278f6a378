/**
 * Admin Handlers
 *
 * User administration. Listing and deleting users needs the admin role;
 * changing roles is reserved for the seeded admin account.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::auth::users::{self, get_user_by_id};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AdminUser, SeedAdmin};
use crate::backend::storage::Storage;
use crate::shared::{Role, UserView};

const USER_NOT_FOUND: &str = "User not found";

/// GET /users
pub async fn list_users(
    AdminUser(_admin): AdminUser,
    State(storage): State<Storage>,
) -> Result<Json<Vec<UserView>>, BackendError> {
    let users = users::list_users(storage.pool()).await?;
    Ok(Json(users.iter().map(|user| user.view()).collect()))
}

/// DELETE /users/{id}
///
/// Only regular users can be deleted. Their votes stay in the ledger, so
/// the book counters keep matching it.
///
/// # Errors
///
/// * `400 Bad Request` - The target is an admin
/// * `404 Not Found` - No such user
pub async fn delete_user(
    AdminUser(admin): AdminUser,
    State(storage): State<Storage>,
    Path(user_id): Path<i64>,
) -> Result<&'static str, BackendError> {
    if !users::delete_regular_user(storage.pool(), user_id).await? {
        return match get_user_by_id(storage.pool(), user_id).await? {
            Some(_) => Err(BackendError::bad_request("Admin accounts cannot be deleted.")),
            None => Err(BackendError::not_found(USER_NOT_FOUND)),
        };
    }

    tracing::info!("{} deleted user {}", admin.username, user_id);
    Ok("User deleted successfully.")
}

/// POST /users/{id}/grant-admin
pub async fn grant_admin(
    SeedAdmin(seed): SeedAdmin,
    State(storage): State<Storage>,
    Path(user_id): Path<i64>,
) -> Result<String, BackendError> {
    if !users::set_role(storage.pool(), user_id, Role::Admin).await? {
        return Err(BackendError::not_found(USER_NOT_FOUND));
    }

    tracing::info!("{} granted admin role to user {}", seed.username, user_id);
    Ok(format!("User with ID {} granted admin role.", user_id))
}

/// POST /users/{id}/revoke-admin
///
/// The seeded admin cannot revoke its own role.
pub async fn revoke_admin(
    SeedAdmin(seed): SeedAdmin,
    State(storage): State<Storage>,
    Path(user_id): Path<i64>,
) -> Result<String, BackendError> {
    if user_id == seed.id {
        return Err(BackendError::bad_request("The seeded admin cannot be revoked."));
    }
    if !users::set_role(storage.pool(), user_id, Role::User).await? {
        return Err(BackendError::not_found(USER_NOT_FOUND));
    }

    tracing::info!("{} revoked admin role of user {}", seed.username, user_id);
    Ok(format!("User with ID {} revoked admin role.", user_id))
}
