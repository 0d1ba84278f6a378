/**
 * API Route Handlers
 *
 * This module wires every JSON/plain-text endpoint of the library to its
 * handler. Access control is not configured here: each handler states the
 * access level it needs through its extractors (`AuthUser`, `AdminUser`,
 * `SeedAdmin`).
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /register`, `POST /login`, `POST /logout`
 * - `GET /current-user`, `GET /checkAuthStatus`
 *
 * ## Catalog
 * - `GET /books`, `GET /books/search`, `GET /books/{id}`
 * - `POST /addBook`, `PUT /books/{id}`, `DELETE /books/{id}` (admin)
 * - `GET /download/{filename}`
 *
 * ## Votes
 * - `POST /books/{id}/like`, `POST /books/{id}/dislike` (logged in)
 * - `GET /books/{id}/votes`
 *
 * ## Users
 * - `GET /users`, `DELETE /users/{id}` (admin)
 * - `POST /users/{id}/grant-admin`, `POST /users/{id}/revoke-admin` (seed admin)
 *
 * ## Profile and extras
 * - `GET /profile`, `POST /updateProfile`, `POST /upload-profile-picture`
 * - `POST /subscribe`, `GET /recommendations`
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::server::state::AppState;
use crate::backend::{admin, auth, books, newsletter, profile, recommendations, uploads, votes};

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/current-user", get(auth::current_user))
        .route("/checkAuthStatus", get(auth::check_auth_status))
        // Catalog
        .route("/books", get(books::list_books))
        .route("/books/search", get(books::search_books))
        .route(
            "/books/{id}",
            get(books::get_book)
                .put(books::edit_book)
                .delete(books::delete_book),
        )
        .route("/addBook", post(books::add_book))
        .route("/download/{filename}", get(uploads::download))
        // Votes
        .route("/books/{id}/like", post(votes::like_book))
        .route("/books/{id}/dislike", post(votes::dislike_book))
        .route("/books/{id}/votes", get(votes::get_votes))
        // User administration
        .route("/users", get(admin::list_users))
        .route("/users/{id}", axum::routing::delete(admin::delete_user))
        .route("/users/{id}/grant-admin", post(admin::grant_admin))
        .route("/users/{id}/revoke-admin", post(admin::revoke_admin))
        // Profile
        .route("/profile", get(profile::get_profile))
        .route("/updateProfile", post(profile::update_profile))
        .route("/upload-profile-picture", post(profile::upload_profile_picture))
        // Newsletter and recommendations
        .route("/subscribe", post(newsletter::subscribe))
        .route("/recommendations", get(recommendations::get_recommendations))
}
