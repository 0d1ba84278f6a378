//! A running test application
//!
//! `TestApp` wires the real router to a temporary directory holding the
//! database, uploads, the newsletter file and the public assets.

use std::path::{Path, PathBuf};

use axum_test::TestServer;
use bookshelf::backend::routes::create_router;
use bookshelf::backend::server::build_state;
use bookshelf::backend::server::config::{ServerConfig, ServerConfigBuilder};
use bookshelf::backend::storage::Storage;
use tempfile::TempDir;

pub const SEED_ADMIN: &str = "admin";
pub const SEED_ADMIN_PASSWORD: &str = "adminpassword";

pub struct TestApp {
    pub server: TestServer,
    pub storage: Storage,
    pub config: ServerConfig,
    dir: TempDir,
}

impl TestApp {
    /// Application with default test settings
    pub async fn spawn() -> Self {
        Self::spawn_with(|builder| builder).await
    }

    /// Application with extra settings applied on top of the defaults
    pub async fn spawn_with<F>(configure: F) -> Self
    where
        F: FnOnce(ServerConfigBuilder) -> ServerConfigBuilder,
    {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let public_dir = dir.path().join("public");
        std::fs::create_dir_all(&public_dir).expect("Failed to create public dir");
        std::fs::write(public_dir.join("index.html"), "<h1>Bookshelf</h1>").expect("Failed to write index");

        let builder = ServerConfig::builder()
            .database_url(format!("sqlite://{}", dir.path().join("library.db").display()))
            .max_connections(8)
            .jwt_secret("integration-test-secret")
            .upload_dir(dir.path().join("uploads"))
            .public_dir(&public_dir)
            .subscribers_file(dir.path().join("subscribers.txt"))
            .recommendation_url("http://127.0.0.1:1")
            .seed_admin(SEED_ADMIN, SEED_ADMIN_PASSWORD)
            .bcrypt_cost(4);
        let config = configure(builder).build().expect("Invalid test config");

        let state = build_state(&config).await.expect("Failed to build state");
        let storage = state.storage.clone();
        let server = TestServer::new(create_router(state, &config.public_dir)).expect("Failed to start test server");

        Self {
            server,
            storage,
            config,
            dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn upload_path(&self, name: &str) -> PathBuf {
        self.config.upload_dir.join(name)
    }
}
