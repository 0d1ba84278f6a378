//! Chatbot Module
//!
//! A small library assistant. Most questions are answered by matching the
//! message against FAQ patterns; anything else may go to a hosted language
//! model when an API key is configured, and otherwise gets a generic reply.
//!
//! # Module Structure
//!
//! ```text
//! chatbot/
//! ├── mod.rs       - Module exports and documentation
//! ├── matcher.rs   - Topic patterns and canned replies
//! ├── ai.rs        - Language model client
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod matcher;
pub mod ai;
pub mod handlers;

pub use ai::AiClient;
pub use handlers::{chat, health};
