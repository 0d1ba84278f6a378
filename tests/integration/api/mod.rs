//! API integration tests
//!
//! Integration tests for all API endpoints

mod admin_test;
mod auth_test;
mod books_test;
mod chat_test;
mod recommendations_test;
