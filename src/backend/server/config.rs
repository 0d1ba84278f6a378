/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration.
 *
 * # Configuration Sources
 *
 * Values are resolved from three layers, lowest precedence first:
 *
 * 1. Built-in defaults suitable for local development
 * 2. An optional TOML file whose path is given by `BOOKSHELF_CONFIG`
 * 3. Environment variables (a `.env` file is loaded by the binary first)
 *
 * | Variable                     | Field                         |
 * |------------------------------|-------------------------------|
 * | `SERVER_PORT`                | `port`                        |
 * | `DATABASE_URL`               | `database.url`                |
 * | `DATABASE_MAX_CONNECTIONS`   | `database.max_connections`    |
 * | `DATABASE_BUSY_TIMEOUT_SECS` | `database.busy_timeout`       |
 * | `JWT_SECRET`                 | `jwt_secret`                  |
 * | `UPLOAD_DIR`                 | `upload_dir`                  |
 * | `PUBLIC_DIR`                 | `public_dir`                  |
 * | `SUBSCRIBERS_FILE`           | `subscribers_file`            |
 * | `RECOMMENDATION_URL`         | `recommendation_url`          |
 * | `HUGGINGFACE_API_KEY`        | `chat.api_key`                |
 * | `CHAT_MODEL_URL`             | `chat.model_url`              |
 * | `SEED_ADMIN_USERNAME`        | `seed_admin.username`         |
 * | `SEED_ADMIN_PASSWORD`        | `seed_admin.password`         |
 * | `BCRYPT_COST`                | `bcrypt_cost`                 |
 *
 * # Error Handling
 *
 * Unreadable or malformed files and unparsable numbers are reported as
 * `ConfigError` and stop startup; nothing is silently replaced by a default.
 */

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the optional TOML config file
pub const CONFIG_FILE_ENV: &str = "BOOKSHELF_CONFIG";

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// SQLite connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://library.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    /// How long a writer waits for the SQLite lock before failing
    pub busy_timeout: Duration,
    /// How long a request waits for a free pooled connection
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://library.db".to_string(),
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Chatbot AI fallback settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// HuggingFace API key; the AI fallback is disabled without one
    pub api_key: Option<String>,
    /// Text-generation endpoint
    pub model_url: String,
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_url: "https://api-inference.huggingface.co/models/gpt2".to_string(),
            timeout: Duration::from_secs(8),
        }
    }
}

/// The account created at startup with the admin role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for SeedAdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "adminpassword".to_string(),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    /// Where uploaded covers, book files and profile pictures are stored
    pub upload_dir: PathBuf,
    /// Static frontend assets
    pub public_dir: PathBuf,
    /// Newsletter subscribers, one email per line
    pub subscribers_file: PathBuf,
    /// Base URL of the external recommendation service
    pub recommendation_url: String,
    pub chat: ChatConfig,
    pub seed_admin: SeedAdminConfig,
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database: DatabaseConfig::default(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            upload_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("public"),
            subscribers_file: PathBuf::from("subscribers.txt"),
            recommendation_url: "http://127.0.0.1:5000".to_string(),
            chat: ChatConfig::default(),
            seed_admin: SeedAdminConfig::default(),
            bcrypt_cost: 10,
        }
    }
}

/// Shape of the optional TOML file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    jwt_secret: Option<String>,
    upload_dir: Option<PathBuf>,
    public_dir: Option<PathBuf>,
    subscribers_file: Option<PathBuf>,
    recommendation_url: Option<String>,
    bcrypt_cost: Option<u32>,
    #[serde(default)]
    database: FileDatabaseConfig,
    #[serde(default)]
    chat: FileChatConfig,
    #[serde(default)]
    seed_admin: FileSeedAdminConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileDatabaseConfig {
    url: Option<String>,
    max_connections: Option<u32>,
    busy_timeout_secs: Option<u64>,
    acquire_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileChatConfig {
    api_key: Option<String>,
    model_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSeedAdminConfig {
    username: Option<String>,
    password: Option<String>,
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// Reads the file named by `BOOKSHELF_CONFIG` if set, then applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or if a
    /// variable holds an invalid value.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            tracing::info!("Loading configuration file {}", path);
            config = config.merge_file(Path::new(&path))?;
        }
        config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        if config.jwt_secret == DEFAULT_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set; using the development default");
        }
        Ok(config)
    }

    /// Overlay values from a TOML file
    pub fn merge_file(self, path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn merge_toml(mut self, raw: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(raw)?;

        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(secret) = file.jwt_secret {
            self.jwt_secret = secret;
        }
        if let Some(dir) = file.upload_dir {
            self.upload_dir = dir;
        }
        if let Some(dir) = file.public_dir {
            self.public_dir = dir;
        }
        if let Some(path) = file.subscribers_file {
            self.subscribers_file = path;
        }
        if let Some(url) = file.recommendation_url {
            self.recommendation_url = url;
        }
        if let Some(cost) = file.bcrypt_cost {
            self.bcrypt_cost = cost;
        }

        if let Some(url) = file.database.url {
            self.database.url = url;
        }
        if let Some(max) = file.database.max_connections {
            self.database.max_connections = max;
        }
        if let Some(secs) = file.database.busy_timeout_secs {
            self.database.busy_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.database.acquire_timeout_secs {
            self.database.acquire_timeout = Duration::from_secs(secs);
        }

        if file.chat.api_key.is_some() {
            self.chat.api_key = file.chat.api_key;
        }
        if let Some(url) = file.chat.model_url {
            self.chat.model_url = url;
        }
        if let Some(secs) = file.chat.timeout_secs {
            self.chat.timeout = Duration::from_secs(secs);
        }

        if let Some(username) = file.seed_admin.username {
            self.seed_admin.username = username;
        }
        if let Some(password) = file.seed_admin.password {
            self.seed_admin.password = password;
        }

        Ok(self)
    }

    /// Overlay values from environment-style variables
    ///
    /// `lookup` returns the value of a variable, or `None` when unset. Empty
    /// values count as unset.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(port) = get("SERVER_PORT") {
            self.port = parse_number("SERVER_PORT", &port)?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(max) = get("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_number("DATABASE_MAX_CONNECTIONS", &max)?;
        }
        if let Some(secs) = get("DATABASE_BUSY_TIMEOUT_SECS") {
            self.database.busy_timeout =
                Duration::from_secs(parse_number("DATABASE_BUSY_TIMEOUT_SECS", &secs)?);
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(dir) = get("UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("PUBLIC_DIR") {
            self.public_dir = PathBuf::from(dir);
        }
        if let Some(path) = get("SUBSCRIBERS_FILE") {
            self.subscribers_file = PathBuf::from(path);
        }
        if let Some(url) = get("RECOMMENDATION_URL") {
            self.recommendation_url = url;
        }
        if let Some(key) = get("HUGGINGFACE_API_KEY") {
            self.chat.api_key = Some(key);
        }
        if let Some(url) = get("CHAT_MODEL_URL") {
            self.chat.model_url = url;
        }
        if let Some(username) = get("SEED_ADMIN_USERNAME") {
            self.seed_admin.username = username;
        }
        if let Some(password) = get("SEED_ADMIN_PASSWORD") {
            self.seed_admin.password = password;
        }
        if let Some(cost) = get("BCRYPT_COST") {
            self.bcrypt_cost = parse_number("BCRYPT_COST", &cost)?;
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::invalid("JWT_SECRET", "must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid("DATABASE_MAX_CONNECTIONS", "must be at least 1"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid("BCRYPT_COST", "must be between 4 and 31"));
        }
        if self.seed_admin.username.is_empty() {
            return Err(ConfigError::invalid("SEED_ADMIN_USERNAME", "must not be empty"));
        }
        Ok(())
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(key, format!("'{}' ({})", value, e)))
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database.url = url.into();
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.config.database.max_connections = max;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.config.database.busy_timeout = timeout;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.public_dir = dir.into();
        self
    }

    pub fn subscribers_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.subscribers_file = path.into();
        self
    }

    pub fn recommendation_url(mut self, url: impl Into<String>) -> Self {
        self.config.recommendation_url = url.into();
        self
    }

    pub fn chat_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.chat.api_key = Some(key.into());
        self
    }

    pub fn chat_model_url(mut self, url: impl Into<String>) -> Self {
        self.config.chat.model_url = url.into();
        self
    }

    pub fn seed_admin(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.seed_admin = SeedAdminConfig {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
