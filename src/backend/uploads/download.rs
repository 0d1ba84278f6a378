/**
 * Download Handler
 *
 * GET /download/{filename} streams a stored upload as an attachment. The
 * attachment name is the client's original name without the uuid prefix.
 */

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderValue},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::backend::error::BackendError;
use crate::backend::uploads::store::{display_name, UploadDir};

const FILE_NOT_FOUND: &str = "File not found";

/// Download handler
///
/// # Errors
///
/// * `404 Not Found` - No such file, or a name that points outside the
///   upload directory
pub async fn download(
    State(uploads): State<UploadDir>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, BackendError> {
    let path = uploads.resolve(&filename).ok_or_else(|| {
        tracing::warn!("Rejected download path {:?}", filename);
        BackendError::not_found(FILE_NOT_FOUND)
    })?;

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(BackendError::not_found(FILE_NOT_FOUND));
    }

    let response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    let mut response = response.map(Body::new);

    let disposition = format!("attachment; filename=\"{}\"", display_name(&filename));
    let value = HeaderValue::from_str(&disposition)
        .map_err(|_| BackendError::internal("Error downloading file"))?;
    response.headers_mut().insert(header::CONTENT_DISPOSITION, value);

    tracing::debug!("Serving download {}", filename);
    Ok(response)
}
