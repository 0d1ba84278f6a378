/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database setup, and route configuration.
 *
 * # Initialization Process
 *
 * The server initialization follows these steps:
 * 1. Open the database pool and apply migrations
 * 2. Seed the admin account if it does not exist
 * 3. Create the upload directory
 * 4. Build the HTTP clients and the rest of `AppState`
 * 5. Create and configure the router
 *
 * # Error Handling
 *
 * Any failure stops startup with an `InitError`. Running without a
 * database or without an upload directory is not supported.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::{ensure_seed_admin, PasswordHasher, TokenKeys};
use crate::backend::chatbot::AiClient;
use crate::backend::error::InitError;
use crate::backend::middleware::SeedAdminName;
use crate::backend::newsletter::Newsletter;
use crate::backend::recommendations::RecommendationClient;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::storage::Storage;
use crate::backend::uploads::UploadDir;

/// Build every collaborator described by `config`
///
/// # Errors
///
/// Returns `InitError` if the database cannot be opened or migrated, the
/// seed admin cannot be created, the upload directory cannot be created,
/// or an HTTP client cannot be built.
pub async fn build_state(config: &ServerConfig) -> Result<AppState, InitError> {
    let storage = Storage::connect(&config.database).await?;
    storage.migrate().await?;

    let passwords = PasswordHasher::new(config.bcrypt_cost);
    ensure_seed_admin(&storage, &passwords, &config.seed_admin).await?;

    let uploads = UploadDir::new(&config.upload_dir);
    uploads.ensure().await.map_err(|source| InitError::Io {
        path: config.upload_dir.clone(),
        source,
    })?;
    tracing::info!("Upload directory: {}", config.upload_dir.display());

    let recommendations = RecommendationClient::new(&config.recommendation_url)?;
    let chatbot = AiClient::new(
        reqwest::Client::builder().build()?,
        &config.chat.model_url,
        config.chat.api_key.clone(),
        config.chat.timeout,
    );
    if chatbot.is_configured() {
        tracing::info!("Chatbot language model fallback enabled");
    } else {
        tracing::info!("No chatbot API key configured; using pattern matching only");
    }

    Ok(AppState {
        storage,
        tokens: TokenKeys::new(&config.jwt_secret),
        passwords,
        seed_admin: SeedAdminName(Arc::from(config.seed_admin.username.as_str())),
        uploads,
        newsletter: Newsletter::new(&config.subscribers_file),
        recommendations,
        chatbot,
    })
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: ServerConfig) -> Result<Router, InitError> {
    tracing::info!("Initializing Bookshelf backend server");

    let state = build_state(&config).await?;
    let app = create_router(state, &config.public_dir);

    tracing::info!("Router configured");
    Ok(app)
}
