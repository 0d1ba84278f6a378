/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Types
 *
 * - `HandlerError` - A request was rejected with a chosen status and message
 * - `Vote` - The vote reconciliation failed
 * - `Database` - Any other sqlx failure
 * - `Password` - bcrypt hashing or verification failed
 * - `Io` - Upload directory or subscriber file access failed
 * - `SharedError` - Validation errors from the shared types
 * - `SerializationError` - JSON errors
 *
 * # Message Policy
 *
 * Client-caused errors carry a message meant for the user. Server-side
 * failures are rendered with a generic message; the detail goes to the log.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::PasswordError;
use crate::backend::server::config::ConfigError;
use crate::backend::votes::VoteError;
use crate::shared::SharedError;

/// Seconds a client is asked to wait before retrying a conflicted vote
pub const CONFLICT_RETRY_AFTER_SECS: u64 = 1;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use bookshelf::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Missing required fields");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::not_found("Book not found");
/// assert_eq!(err.message(), "Book not found");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request rejected by a handler or extractor
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Message returned to the client
        message: String,
    },

    /// Vote reconciliation error
    #[error(transparent)]
    Vote(#[from] VoteError),

    /// Database error outside the vote core
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing error
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 403 Forbidden
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 500 Internal Server Error with a specific message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Vote` - 400 duplicate, 404 missing book, 500 otherwise
    /// - `SharedError` - 400 for validation, 500 for serialization
    /// - Everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Vote(err) => match err {
                VoteError::DuplicateVote(_) => StatusCode::BAD_REQUEST,
                VoteError::BookNotFound(_) => StatusCode::NOT_FOUND,
                VoteError::Conflict(_) | VoteError::StorageUnavailable(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(_) | Self::Password(_) | Self::Io(_) | Self::SerializationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message returned to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Vote(VoteError::Conflict(_)) => {
                "The vote could not be recorded because of a concurrent update. Please try again.".to_string()
            }
            Self::Vote(VoteError::StorageUnavailable(_)) => "Error recording vote".to_string(),
            Self::Vote(err) => err.to_string(),
            Self::SharedError(err @ SharedError::ValidationError { .. }) => err.to_string(),
            _ => "Internal server error".to_string(),
        }
    }

    /// `Retry-After` value for errors the client may retry
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Vote(err) if err.is_retryable() => Some(CONFLICT_RETRY_AFTER_SECS),
            _ => None,
        }
    }
}

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum InitError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to seed admin account: {0}")]
    SeedAdmin(#[from] PasswordError),

    #[error("failed to prepare {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
