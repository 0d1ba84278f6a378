/**
 * Upload Storage
 *
 * Validated uploads are written into one flat directory under a
 * collision-free name `<uuid>-<sanitized original name>`. Only that stored
 * name is kept in the database.
 */

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::uploads::sanitize::{file_extension, sanitize_filename};

const MB: usize = 1024 * 1024;
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// What an upload is used for; decides size and type limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Cover,
    ProfilePicture,
    BookFile,
}

impl FileKind {
    pub const fn max_bytes(&self) -> usize {
        match self {
            Self::Cover => 2 * MB,
            Self::ProfilePicture => 5 * MB,
            Self::BookFile => 50 * MB,
        }
    }

    fn requires_image(&self) -> bool {
        matches!(self, Self::Cover | Self::ProfilePicture)
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Cover => "book covers",
            Self::ProfilePicture => "profile pictures",
            Self::BookFile => "book files",
        }
    }
}

/// A file received in a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name as sent by the client, unsanitized
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Image by MIME type or by extension
    pub fn is_image(&self) -> bool {
        let by_mime = self
            .content_type
            .as_deref()
            .map(|mime| mime.to_ascii_lowercase().starts_with("image/"))
            .unwrap_or(false);
        by_mime || IMAGE_EXTENSIONS.contains(&file_extension(&self.file_name).as_str())
    }

    /// Check size and type limits for `kind`
    pub fn validate(&self, kind: FileKind) -> Result<(), BackendError> {
        if kind.requires_image() && !self.is_image() {
            return Err(BackendError::bad_request(format!(
                "Only image files are allowed for {}",
                kind.label()
            )));
        }
        if self.bytes.len() > kind.max_bytes() {
            return Err(BackendError::bad_request(format!(
                "File too large. Maximum size for {} is {} MB. Your file is {:.2} MB.",
                kind.label(),
                kind.max_bytes() / MB,
                self.bytes.len() as f64 / MB as f64
            )));
        }
        Ok(())
    }
}

/// The directory holding every uploaded file
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it is missing
    pub async fn ensure(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write a file and return its stored name
    pub async fn store(&self, file: &UploadedFile) -> std::io::Result<String> {
        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_filename(&file.file_name));
        self.ensure().await?;
        tokio::fs::write(self.root.join(&stored_name), &file.bytes).await?;
        tracing::debug!("Stored upload {} ({} bytes)", stored_name, file.bytes.len());
        Ok(stored_name)
    }

    /// Delete a stored file; a missing file is not an error
    pub async fn remove(&self, stored_name: &str) -> std::io::Result<()> {
        let Some(path) = self.resolve(stored_name) else {
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Path of a stored file, or `None` if the name could escape the directory
    pub fn resolve(&self, stored_name: &str) -> Option<PathBuf> {
        let is_plain = !stored_name.is_empty()
            && stored_name != "."
            && stored_name != ".."
            && !stored_name.contains(['/', '\\', '\0']);
        is_plain.then(|| self.root.join(stored_name))
    }
}

/// URL under which a stored upload is served
pub fn public_url(stored_name: &str) -> String {
    format!("/uploads/{}", stored_name)
}

/// The client's original name, without the uuid prefix added by `store`
pub fn display_name(stored_name: &str) -> &str {
    match (stored_name.get(..36), stored_name.get(36..)) {
        (Some(prefix), Some(rest)) if rest.starts_with('-') && Uuid::parse_str(prefix).is_ok() => {
            &rest[1..]
        }
        _ => stored_name,
    }
}
