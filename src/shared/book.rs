//! Book catalog types.
//!
//! Genres travel as a list on the wire but are stored as a single
//! comma-separated column; `split_genres`/`join_genres` convert between the two.

use serde::{Deserialize, Serialize};

use crate::shared::SharedError;

/// A book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genres: Vec<String>,
    pub summary: Option<String>,
    /// Stored file name of the cover image inside the upload directory
    pub cover: Option<String>,
    /// Stored file name of the downloadable book file
    pub file: Option<String>,
    pub likes: i64,
    pub dislikes: i64,
}

/// One page of a filtered catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookPage {
    pub books: Vec<Book>,
    /// Number of books matching the filters across all pages
    pub total: i64,
}

/// Editable book metadata. Vote counters are deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub description: String,
}

impl BookUpdate {
    /// Reject updates that would blank out required metadata
    pub fn validate(&self) -> Result<(), SharedError> {
        require("title", &self.title)?;
        require("author", &self.author)?;
        require("description", &self.description)?;
        Ok(())
    }
}

/// Fail with "Missing required fields" when `value` is blank
pub fn require(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, "Missing required fields"));
    }
    Ok(())
}

/// Split the stored genre column into a clean list
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join a genre list into the stored column format
pub fn join_genres(genres: &[String]) -> String {
    genres
        .iter()
        .map(|genre| genre.trim())
        .filter(|genre| !genre.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}
