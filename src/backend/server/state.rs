/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The storage handle (SQLite pool)
 * - JWT keys and the password hasher
 * - The upload directory and the newsletter file
 * - HTTP clients for the recommendation service and the language model
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers and extractors to take
 * only the piece they need, e.g. `State(storage): State<Storage>`. The
 * authentication extractors rely on this too: they require
 * `Storage: FromRef<S>` and `TokenKeys: FromRef<S>`.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use bookshelf::backend::storage::Storage;
 *
 * async fn handler(State(storage): State<Storage>) {
 *     let _pool = storage.pool();
 * }
 * ```
 */

use axum::extract::FromRef;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenKeys;
use crate::backend::chatbot::AiClient;
use crate::backend::middleware::SeedAdminName;
use crate::backend::newsletter::Newsletter;
use crate::backend::recommendations::RecommendationClient;
use crate::backend::storage::Storage;
use crate::backend::uploads::UploadDir;

/// Application state shared by every handler
///
/// Every field is cheap to clone: pools, clients and keys are reference
/// counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database handle
    pub storage: Storage,

    /// JWT signing and verification keys
    pub tokens: TokenKeys,

    /// bcrypt with the configured cost
    pub passwords: PasswordHasher,

    /// Username of the seeded admin account
    pub seed_admin: SeedAdminName,

    /// Where uploads are stored and served from
    pub uploads: UploadDir,

    /// Newsletter subscriber file
    pub newsletter: Newsletter,

    /// Recommendation service client
    pub recommendations: RecommendationClient,

    /// Language model client for the chatbot
    pub chatbot: AiClient,
}

impl FromRef<AppState> for Storage {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.passwords
    }
}

impl FromRef<AppState> for SeedAdminName {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.seed_admin.clone()
    }
}

impl FromRef<AppState> for UploadDir {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.uploads.clone()
    }
}

impl FromRef<AppState> for Newsletter {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.newsletter.clone()
    }
}

impl FromRef<AppState> for RecommendationClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.recommendations.clone()
    }
}

impl FromRef<AppState> for AiClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chatbot.clone()
    }
}
