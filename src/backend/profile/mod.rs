//! Profile Module
//!
//! Endpoints through which a logged-in user manages their own account
//! details. Profile pictures go through the same upload limits and upload
//! directory as book files.

pub mod handlers;

pub use handlers::{get_profile, update_profile, upload_profile_picture};
