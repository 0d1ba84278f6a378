//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, static files, layers
//! ├── chat_routes.rs  - Chatbot routes
//! └── api_routes.rs   - Everything else
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf::backend::routes::create_router;
//! use bookshelf::backend::server::{build_state, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let state = build_state(&config).await?;
//! let router = create_router(state, &config.public_dir);
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// Chatbot routes
pub mod chat_routes;

/// API routes
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
