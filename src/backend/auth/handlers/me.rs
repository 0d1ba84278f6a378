/**
 * Current User Handler
 *
 * GET /current-user returns the authenticated user without the password hash.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::storage::Storage;
use crate::shared::UserView;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - No valid token (rejected by the extractor)
/// * `404 Not Found` - The account disappeared after authentication
pub async fn current_user(
    user: AuthUser,
    State(storage): State<Storage>,
) -> Result<Json<UserView>, BackendError> {
    let user = get_user_by_id(storage.pool(), user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(user.view()))
}
