//! Newsletter Module
//!
//! Captures newsletter subscriptions in a plain text file, one email per
//! line. Sending the newsletter is out of scope; this only collects
//! addresses.
//!
//! The read-check-append sequence runs under one async mutex, so two
//! concurrent requests for the same address cannot both be appended.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// The subscriber file and the lock that serializes writes to it
#[derive(Debug, Clone)]
pub struct Newsletter {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl Newsletter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current subscribers; a missing file means nobody has subscribed
    pub async fn subscribers(&self) -> std::io::Result<Vec<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Append `email` unless it is already subscribed
    ///
    /// Returns `false` for a duplicate.
    pub async fn subscribe(&self, email: &str) -> std::io::Result<bool> {
        let _guard = self.lock.lock().await;

        if self.subscribers().await?.iter().any(|existing| existing == email) {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", email).as_bytes()).await?;
        file.flush().await?;
        Ok(true)
    }
}

/// One line of the subscriber file: an `@`, no whitespace or control characters
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && !email.chars().any(|c| c.is_whitespace() || c.is_control())
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

/// POST /subscribe
pub async fn subscribe(
    user: AuthUser,
    State(newsletter): State<Newsletter>,
    Json(request): Json<SubscribeRequest>,
) -> Result<&'static str, BackendError> {
    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| BackendError::bad_request("Email is required"))?;

    if !is_valid_email(email) {
        tracing::warn!("Rejected newsletter address {:?} from {}", email, user.username);
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if !newsletter.subscribe(email).await? {
        return Err(BackendError::bad_request("Email is already subscribed"));
    }

    tracing::info!("{} subscribed to the newsletter", user.username);
    Ok("Subscribed successfully")
}
