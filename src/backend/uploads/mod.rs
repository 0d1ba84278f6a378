//! Uploads Module
//!
//! Everything that touches files sent by clients: name sanitizing, size and
//! type limits, the upload directory, multipart reading and downloads.
//!
//! # Module Structure
//!
//! ```text
//! uploads/
//! ├── mod.rs       - Module exports and documentation
//! ├── sanitize.rs  - Filename sanitizing
//! ├── store.rs     - Limits and the upload directory
//! ├── form.rs      - Multipart form reading
//! └── download.rs  - GET /download/{filename}
//! ```
//!
//! # Limits
//!
//! | Kind            | Type        | Max size |
//! |-----------------|-------------|----------|
//! | Book cover      | image       | 2 MB     |
//! | Profile picture | image       | 5 MB     |
//! | Book file       | any         | 50 MB    |

pub mod sanitize;
pub mod store;
pub mod form;
pub mod download;

pub use download::download;
pub use form::MultipartForm;
pub use sanitize::sanitize_filename;
pub use store::{FileKind, UploadDir, UploadedFile};
