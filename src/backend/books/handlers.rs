/**
 * Book Handlers
 *
 * HTTP handlers for the catalog. Reads are public; adding, editing and
 * deleting books require an admin.
 *
 * # Endpoints
 *
 * - `GET /books` - Filtered, paginated listing
 * - `GET /books/search` - Title or author search
 * - `GET /books/{id}` - A single book
 * - `POST /addBook` - Multipart upload of a new book (admin)
 * - `PUT /books/{id}` - Edit metadata (admin)
 * - `DELETE /books/{id}` - Delete a book and its files (admin)
 */

use axum::{
    extract::{Multipart, Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::backend::books::db::{self, BookFilter, NewBook};
use crate::backend::error::BackendError;
use crate::backend::middleware::AdminUser;
use crate::backend::storage::Storage;
use crate::backend::uploads::{FileKind, MultipartForm, UploadDir};
use crate::shared::{Book, BookPage, BookUpdate};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

const BOOK_NOT_FOUND: &str = "Book not found";

/// Query string of `GET /books`
///
/// Page and limit are parsed leniently: anything that is not a positive
/// number falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> BookFilter {
        BookFilter {
            title: self.title.clone().unwrap_or_default(),
            author: self.author.clone().unwrap_or_default(),
            genre: self.genre.clone().unwrap_or_default(),
        }
    }

    /// 1-based page number
    fn page(&self) -> i64 {
        positive(self.page.as_deref()).unwrap_or(1)
    }

    fn limit(&self) -> i64 {
        positive(self.limit.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }
}

fn positive(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// List books
pub async fn list_books(
    State(storage): State<Storage>,
    Query(params): Query<ListQuery>,
) -> Result<Json<BookPage>, BackendError> {
    let filter = params.filter();
    let limit = params.limit();
    let offset = (params.page() - 1).saturating_mul(limit);

    let books = db::list_books(storage.pool(), &filter, limit, offset).await?;
    let total = db::count_books(storage.pool(), &filter).await?;

    Ok(Json(BookPage { books, total }))
}

/// Search books by title or author
pub async fn search_books(
    State(storage): State<Storage>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Book>>, BackendError> {
    let query = params.query.unwrap_or_default();
    let books = db::search_books(storage.pool(), query.trim()).await?;
    Ok(Json(books))
}

/// Get one book
pub async fn get_book(
    State(storage): State<Storage>,
    Path(book_id): Path<i64>,
) -> Result<Json<Book>, BackendError> {
    db::get_book(storage.pool(), book_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found(BOOK_NOT_FOUND))
}

/// Add a book
///
/// Multipart fields: `title`, `author`, `description`, `genres` (a JSON
/// array of strings), optional `summary`, and the files `bookCover` and
/// `bookFile`.
///
/// # Errors
///
/// * `400 Bad Request` - Missing fields, malformed genres, or a file that
///   breaks the upload limits
/// * `403 Forbidden` - Not an admin
pub async fn add_book(
    AdminUser(admin): AdminUser,
    State(storage): State<Storage>,
    State(uploads): State<UploadDir>,
    multipart: Multipart,
) -> Result<&'static str, BackendError> {
    let mut form = MultipartForm::read(multipart).await?;

    let genres: Vec<String> = match form.text("genres") {
        Some(raw) => serde_json::from_str(raw).map_err(|e| {
            tracing::warn!("Invalid genres payload {:?}: {}", raw, e);
            BackendError::bad_request("Invalid genres format")
        })?,
        None => Vec::new(),
    };

    let (Some(title), Some(author), Some(description)) =
        (form.text("title"), form.text("author"), form.text("description"))
    else {
        return Err(BackendError::bad_request("Missing required fields"));
    };
    if genres.iter().all(|genre| genre.trim().is_empty()) {
        return Err(BackendError::bad_request("Missing required fields"));
    }

    let mut book = NewBook {
        title: title.to_string(),
        author: author.to_string(),
        description: description.to_string(),
        genres,
        summary: form.text("summary").map(str::to_string),
        cover: None,
        file: None,
    };

    let cover = form.take_file("bookCover");
    let file = form.take_file("bookFile");
    if let Some(cover) = &cover {
        cover.validate(FileKind::Cover)?;
    }
    if let Some(file) = &file {
        file.validate(FileKind::BookFile)?;
    }

    if let Some(cover) = &cover {
        book.cover = Some(uploads.store(cover).await?);
    }
    if let Some(file) = &file {
        book.file = Some(uploads.store(file).await?);
    }

    match db::insert_book(storage.pool(), &book).await {
        Ok(id) => {
            tracing::info!("{} added book {} ({:?})", admin.username, id, book.title);
            Ok("Book added successfully")
        }
        Err(e) => {
            for stored in book.cover.iter().chain(book.file.iter()) {
                if let Err(remove_err) = uploads.remove(stored).await {
                    tracing::warn!("Failed to remove orphaned upload {}: {}", stored, remove_err);
                }
            }
            Err(e.into())
        }
    }
}

/// Edit a book's metadata; the vote counters are never touched
pub async fn edit_book(
    AdminUser(admin): AdminUser,
    State(storage): State<Storage>,
    Path(book_id): Path<i64>,
    Json(update): Json<BookUpdate>,
) -> Result<&'static str, BackendError> {
    update.validate()?;

    if !db::update_book(storage.pool(), book_id, &update).await? {
        return Err(BackendError::not_found(BOOK_NOT_FOUND));
    }

    tracing::info!("{} edited book {}", admin.username, book_id);
    Ok("Book edited successfully")
}

/// Delete a book, its votes and its files
pub async fn delete_book(
    AdminUser(admin): AdminUser,
    State(storage): State<Storage>,
    State(uploads): State<UploadDir>,
    Path(book_id): Path<i64>,
) -> Result<&'static str, BackendError> {
    let book = db::delete_book(storage.pool(), book_id)
        .await?
        .ok_or_else(|| BackendError::not_found(BOOK_NOT_FOUND))?;

    for stored in book.cover.iter().chain(book.file.iter()) {
        if let Err(e) = uploads.remove(stored).await {
            tracing::warn!("Failed to remove {} of deleted book {}: {}", stored, book_id, e);
        }
    }

    tracing::info!("{} deleted book {} ({:?})", admin.username, book_id, book.title);
    Ok("Book deleted successfully")
}
