/**
 * Password Hashing
 *
 * bcrypt is CPU-bound, so hashing and verification run on the blocking
 * thread pool instead of stalling the async workers.
 */

use thiserror::Error;

/// Failure while hashing or verifying a password
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("password worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// bcrypt with a fixed work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Check a plaintext password against a stored hash
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(valid)
    }
}
