//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! ├── me.rs        - Get current user handler
//! └── status.rs    - Logout and auth status
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /register - User registration
//! - **`login`** - POST /login - User authentication
//! - **`current_user`** - GET /current-user - Get current user info
//! - **`logout`** - POST /logout - Stateless logout
//! - **`check_auth_status`** - GET /checkAuthStatus - Whether the token is valid

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Logout and auth status
pub mod status;

pub use types::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse};

pub use login::login;
pub use me::current_user;
pub use register::register;
pub use status::{check_auth_status, logout};
