/**
 * Book Database Operations
 *
 * Catalog reads and admin writes on the `books` table. None of these
 * functions write `likes` or `dislikes`; the counters belong to
 * `backend::votes`.
 */

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::shared::book::{join_genres, split_genres};
use crate::shared::{Book, BookUpdate};

const BOOK_COLUMNS: &str =
    "id, title, author, description, genres, summary, cover, file, likes, dislikes";

/// Raw `books` row; genres are still the stored comma-separated column
#[derive(Debug, sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    description: String,
    genres: String,
    summary: Option<String>,
    cover: Option<String>,
    file: Option<String>,
    likes: i64,
    dislikes: i64,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            description: row.description,
            genres: split_genres(&row.genres),
            summary: row.summary,
            cover: row.cover,
            file: row.file,
            likes: row.likes,
            dislikes: row.dislikes,
        }
    }
}

/// Substring filters of a catalog listing; empty strings match everything
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub title: String,
    pub author: String,
    pub genre: String,
}

/// A book about to be inserted
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub genres: Vec<String>,
    pub summary: Option<String>,
    pub cover: Option<String>,
    pub file: Option<String>,
}

/// `%value%` with LIKE wildcards in `value` escaped
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

const FILTER_CLAUSE: &str = "title LIKE ? ESCAPE '\\' AND author LIKE ? ESCAPE '\\' \
     AND genres LIKE ? ESCAPE '\\'";

/// One page of books matching `filter`, by id
pub async fn list_books<'e, E>(
    executor: E,
    filter: &BookFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Book>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {} FROM books WHERE {} ORDER BY id LIMIT ? OFFSET ?",
        BOOK_COLUMNS, FILTER_CLAUSE
    );
    let rows = sqlx::query_as::<_, BookRow>(&sql)
        .bind(contains_pattern(&filter.title))
        .bind(contains_pattern(&filter.author))
        .bind(contains_pattern(&filter.genre))
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;
    Ok(rows.into_iter().map(Book::from).collect())
}

/// Number of books matching `filter`
pub async fn count_books<'e, E>(executor: E, filter: &BookFilter) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT COUNT(*) FROM books WHERE {}", FILTER_CLAUSE);
    sqlx::query_scalar(&sql)
        .bind(contains_pattern(&filter.title))
        .bind(contains_pattern(&filter.author))
        .bind(contains_pattern(&filter.genre))
        .fetch_one(executor)
        .await
}

/// Books whose title or author contains `query`
pub async fn search_books<'e, E>(executor: E, query: &str) -> Result<Vec<Book>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT {} FROM books WHERE title LIKE ? ESCAPE '\\' OR author LIKE ? ESCAPE '\\' ORDER BY id",
        BOOK_COLUMNS
    );
    let pattern = contains_pattern(query);
    let rows = sqlx::query_as::<_, BookRow>(&sql)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(executor)
        .await?;
    Ok(rows.into_iter().map(Book::from).collect())
}

pub async fn get_book<'e, E>(executor: E, id: i64) -> Result<Option<Book>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS);
    let row = sqlx::query_as::<_, BookRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(Book::from))
}

/// Insert a book with zeroed counters and return its id
pub async fn insert_book<'e, E>(executor: E, book: &NewBook) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar(
        r#"
        INSERT INTO books (title, author, description, genres, summary, cover, file, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.description)
    .bind(join_genres(&book.genres))
    .bind(&book.summary)
    .bind(&book.cover)
    .bind(&book.file)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

/// Replace a book's metadata; `false` if the book does not exist
pub async fn update_book<'e, E>(executor: E, id: i64, update: &BookUpdate) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE books
        SET title = ?, author = ?, genres = ?, summary = ?, description = ?
        WHERE id = ?
        "#,
    )
    .bind(&update.title)
    .bind(&update.author)
    .bind(join_genres(&update.genres))
    .bind(&update.summary)
    .bind(&update.description)
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Delete a book and return the row as it was; its votes cascade
pub async fn delete_book<'e, E>(executor: E, id: i64) -> Result<Option<Book>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("DELETE FROM books WHERE id = ? RETURNING {}", BOOK_COLUMNS);
    let row = sqlx::query_as::<_, BookRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(Book::from))
}
