/**
 * Session Status Handlers
 *
 * Tokens are stateless JWTs, so logging out only means the client drops its
 * token. `check_auth_status` never fails: an invalid or missing token simply
 * reports `false`.
 */

use axum::response::Json;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// POST /logout
pub async fn logout() -> &'static str {
    "Logged out successfully."
}

/// GET /checkAuthStatus
pub async fn check_auth_status(user: Result<AuthUser, BackendError>) -> Json<bool> {
    Json(user.is_ok())
}
