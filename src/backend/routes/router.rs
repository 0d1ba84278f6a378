/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Chat routes (`/api/chat`)
 * 2. API routes (auth, catalog, votes, admin, profile, ...)
 * 3. `/uploads` - stored covers, book files and profile pictures
 * 4. Fallback - static files from the public directory, then 404
 *
 * # Layers
 *
 * - `DefaultBodyLimit` raised so that 50 MB book files fit in a multipart
 *   request
 * - `TraceLayer` for one span per request
 */

use std::path::Path;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;
use crate::backend::uploads::FileKind;

/// Largest accepted request body: the largest upload plus room for the
/// other form fields
pub const MAX_BODY_BYTES: usize = FileKind::BookFile.max_bytes() + 1024 * 1024;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state
/// * `public_dir` - Directory of the static front end
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState, public_dir: &Path) -> Router<()> {
    let uploads = ServeDir::new(app_state.uploads.root());

    let router = configure_chat_routes(Router::new());
    let router = configure_api_routes(router);

    router
        .nest_service("/uploads", uploads)
        .fallback_service(ServeDir::new(public_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
