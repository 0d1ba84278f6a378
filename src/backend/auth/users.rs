/**
 * User Model and Database Operations
 *
 * This module owns the `users` table: accounts, roles and profile fields.
 */

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};

use crate::backend::uploads::store::public_url;
use crate::shared::{Role, UserView};

const USER_COLUMNS: &str = "id, username, password_hash, role, email, profile_picture, \
     favorite_genres, favorite_authors, favorite_books, created_at";

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub email: Option<String>,
    /// Stored file name of the profile picture inside the upload directory
    pub profile_picture: Option<String>,
    pub favorite_genres: Option<String>,
    pub favorite_authors: Option<String>,
    pub favorite_books: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The client-safe view of this user
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
            email: self.email.clone(),
            profile_picture: self.profile_picture.as_deref().map(public_url),
            favorite_genres: self.favorite_genres.clone(),
            favorite_authors: self.favorite_authors.clone(),
            favorite_books: self.favorite_books.clone(),
        }
    }
}

/// Profile fields a user may edit
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub favorite_genres: Option<String>,
    pub favorite_authors: Option<String>,
    pub favorite_books: Option<String>,
    /// New bcrypt hash, or `None` to keep the current password
    pub password_hash: Option<String>,
}

/// Create a new user
///
/// # Errors
/// A unique violation if the username is taken
pub async fn create_user<'e, E>(
    executor: E,
    username: &str,
    password_hash: &str,
    role: Role,
    email: Option<&str>,
) -> Result<User, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "INSERT INTO users (username, password_hash, role, email, created_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING {}",
        USER_COLUMNS
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(email)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
}

/// Get user by username
pub async fn get_user_by_username<'e, E>(executor: E, username: &str) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
    sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(executor)
        .await
}

/// Get user by ID
pub async fn get_user_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// All users, oldest first
pub async fn list_users<'e, E>(executor: E) -> Result<Vec<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
    sqlx::query_as::<_, User>(&sql).fetch_all(executor).await
}

/// Delete a user that is not an admin
///
/// Returns `false` if no such non-admin user exists. The user's votes stay
/// in the ledger.
pub async fn delete_regular_user<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM users WHERE id = ? AND role = 'user'")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Change a user's role; `false` if the user does not exist
pub async fn set_role<'e, E>(executor: E, id: i64, role: Role) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
        .bind(role.as_str())
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Apply profile edits; `false` if the user does not exist
pub async fn update_profile<'e, E>(executor: E, id: i64, changes: &ProfileChanges) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        UPDATE users
        SET email = ?,
            favorite_genres = ?,
            favorite_authors = ?,
            favorite_books = ?,
            password_hash = COALESCE(?, password_hash)
        WHERE id = ?
        "#,
    )
    .bind(changes.email.as_deref())
    .bind(changes.favorite_genres.as_deref())
    .bind(changes.favorite_authors.as_deref())
    .bind(changes.favorite_books.as_deref())
    .bind(changes.password_hash.as_deref())
    .bind(id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Point the user's profile picture at a stored upload
pub async fn set_profile_picture<'e, E>(executor: E, id: i64, stored_name: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE users SET profile_picture = ? WHERE id = ?")
        .bind(stored_name)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() == 1)
}
