//! Fixtures shared by the unit tests.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use crate::backend::auth::users::create_user;
use crate::backend::auth::{PasswordHasher, TokenKeys};
use crate::backend::chatbot::AiClient;
use crate::backend::middleware::{AuthUser, SeedAdminName};
use crate::backend::newsletter::Newsletter;
use crate::backend::recommendations::RecommendationClient;
use crate::backend::server::config::DatabaseConfig;
use crate::backend::server::state::AppState;
use crate::backend::storage::Storage;
use crate::backend::uploads::UploadDir;
use crate::shared::Role;

/// A migrated, empty in-memory database
pub(crate) async fn memory_storage() -> Storage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..Default::default()
    };
    let storage = Storage::connect(&config).await.unwrap();
    storage.migrate().await.unwrap();
    storage
}

/// Insert a book with zeroed counters and return its id
pub(crate) async fn insert_book(storage: &Storage, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO books (title, author, description, genres, created_at) \
         VALUES (?, 'Author', 'Description', 'Fiction', '2024-01-01T00:00:00Z') RETURNING id",
    )
    .bind(title)
    .fetch_one(storage.pool())
    .await
    .unwrap()
}

async fn insert_with_role(storage: &Storage, username: &str, password_hash: &str, role: Role) -> AuthUser {
    let user = create_user(storage.pool(), username, password_hash, role, None)
        .await
        .unwrap();
    AuthUser {
        id: user.id,
        username: user.username,
        role: user.role,
    }
}

pub(crate) async fn insert_user(storage: &Storage, username: &str) -> AuthUser {
    insert_with_role(storage, username, "not-a-real-hash", Role::User).await
}

pub(crate) async fn insert_admin(storage: &Storage, username: &str) -> AuthUser {
    insert_with_role(storage, username, "not-a-real-hash", Role::Admin).await
}

/// A regular user whose password really verifies (bcrypt cost 4)
pub(crate) async fn insert_user_with_password(storage: &Storage, username: &str, password: &str) -> AuthUser {
    let hash = PasswordHasher::new(4).hash(password).await.unwrap();
    insert_with_role(storage, username, &hash, Role::User).await
}

/// Full application state on an in-memory database
///
/// Uploads and the newsletter file live in the returned scratch directory,
/// which is removed when it is dropped.
pub(crate) async fn test_state() -> (AppState, TempDir) {
    let scratch = tempfile::tempdir().unwrap();
    let state = AppState {
        storage: memory_storage().await,
        tokens: TokenKeys::new("test-secret"),
        passwords: PasswordHasher::new(4),
        seed_admin: SeedAdminName(Arc::from("admin")),
        uploads: UploadDir::new(scratch.path().join("uploads")),
        newsletter: Newsletter::new(scratch.path().join("subscribers.txt")),
        recommendations: RecommendationClient::with_client(reqwest::Client::new(), "http://127.0.0.1:1"),
        chatbot: AiClient::new(reqwest::Client::new(), "http://127.0.0.1:1", None, Duration::from_secs(1)),
    };
    (state, scratch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scratch_dir_is_removed_on_drop() {
        let (state, scratch) = test_state().await;
        state.uploads.ensure().await.unwrap();
        state.newsletter.subscribe("reader@example.com").await.unwrap();
        let root = scratch.path().to_path_buf();
        assert!(root.join("uploads").is_dir());

        drop(state);
        drop(scratch);

        assert!(!root.exists());
    }
}
