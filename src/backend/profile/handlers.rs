/**
 * Profile Handlers
 *
 * A logged-in user reads and edits their own profile and uploads a
 * profile picture.
 *
 * # Endpoints
 *
 * - `GET /profile` - The caller's profile
 * - `POST /updateProfile` - Replace email and favorites, optionally the password
 * - `POST /upload-profile-picture` - Multipart `profilePicture`
 */

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::users::{self, get_user_by_id, ProfileChanges};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::storage::Storage;
use crate::backend::uploads::store::public_url;
use crate::backend::uploads::{FileKind, MultipartForm, UploadDir};
use crate::shared::UserView;

const MIN_PASSWORD_LEN: usize = 8;

/// Body of `POST /updateProfile`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    /// New password; blank or absent keeps the current one
    pub password: Option<String>,
    pub favorite_genres: Option<String>,
    pub favorite_authors: Option<String>,
    pub favorite_books: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePictureResponse {
    pub profile_picture_url: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// GET /profile
pub async fn get_profile(
    user: AuthUser,
    State(storage): State<Storage>,
) -> Result<Json<UserView>, BackendError> {
    let user = get_user_by_id(storage.pool(), user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    Ok(Json(user.view()))
}

/// POST /updateProfile
pub async fn update_profile(
    user: AuthUser,
    State(storage): State<Storage>,
    State(hasher): State<PasswordHasher>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<&'static str, BackendError> {
    let email = non_blank(request.email);
    if let Some(email) = &email {
        if !email.contains('@') {
            return Err(BackendError::bad_request("Invalid email format"));
        }
    }

    let password_hash = match request.password.filter(|p| !p.is_empty()) {
        Some(password) if password.len() < MIN_PASSWORD_LEN => {
            return Err(BackendError::bad_request("Password must be at least 8 characters"));
        }
        Some(password) => Some(hasher.hash(&password).await?),
        None => None,
    };
    let password_changed = password_hash.is_some();

    let changes = ProfileChanges {
        email,
        favorite_genres: non_blank(request.favorite_genres),
        favorite_authors: non_blank(request.favorite_authors),
        favorite_books: non_blank(request.favorite_books),
        password_hash,
    };

    if !users::update_profile(storage.pool(), user.id, &changes).await? {
        return Err(BackendError::not_found("User not found"));
    }

    tracing::info!(
        "Profile of {} updated (password changed: {})",
        user.username,
        password_changed
    );
    Ok("Profile updated successfully.")
}

/// POST /upload-profile-picture
///
/// The previous picture, if any, is removed from the upload directory.
pub async fn upload_profile_picture(
    user: AuthUser,
    State(storage): State<Storage>,
    State(uploads): State<UploadDir>,
    multipart: Multipart,
) -> Result<Json<ProfilePictureResponse>, BackendError> {
    let mut form = MultipartForm::read(multipart).await?;
    let picture = form
        .take_file("profilePicture")
        .ok_or_else(|| BackendError::bad_request("No file uploaded"))?;
    picture.validate(FileKind::ProfilePicture)?;

    let previous = get_user_by_id(storage.pool(), user.id)
        .await?
        .and_then(|row| row.profile_picture);

    let stored = uploads.store(&picture).await?;
    if !users::set_profile_picture(storage.pool(), user.id, &stored).await? {
        uploads.remove(&stored).await?;
        return Err(BackendError::not_found("User not found"));
    }

    if let Some(previous) = previous {
        if let Err(e) = uploads.remove(&previous).await {
            tracing::warn!("Failed to remove old profile picture {}: {}", previous, e);
        }
    }

    tracing::info!("{} uploaded a new profile picture", user.username);
    Ok(Json(ProfilePictureResponse {
        profile_picture_url: public_url(&stored),
    }))
}
