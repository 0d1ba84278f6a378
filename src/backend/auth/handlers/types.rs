/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 */

use serde::{Deserialize, Serialize};

use crate::shared::UserView;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// 3-30 chars, starts with a letter, letters/digits/underscore only
    pub username: String,
    /// At least 8 characters; hashed before storage
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by register
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserView,
}

/// Returned by login
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// JWT token for authentication (30-day expiration)
    pub token: String,
    pub user: UserView,
}
