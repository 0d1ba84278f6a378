//! Books Module
//!
//! The catalog: listing, search, single-book reads and the admin write
//! paths. Vote counters are read here but only ever written by
//! `backend::votes`.
//!
//! # Module Structure
//!
//! ```text
//! books/
//! ├── mod.rs       - Module exports and documentation
//! ├── db.rs        - Database operations on the books table
//! └── handlers.rs  - HTTP handlers
//! ```

/// Database operations on the books table
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{add_book, delete_book, edit_book, get_book, list_books, search_books};
