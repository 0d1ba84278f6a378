//! Recommendations Module
//!
//! Proxy to the external recommendation service. How recommendations are
//! computed is the service's business; this module only forwards the user
//! id and relays the answer.

/// HTTP client for the recommendation service
pub mod client;

/// HTTP handler
pub mod handlers;

pub use client::{RecommendationClient, RecommendationError};
pub use handlers::get_recommendations;
