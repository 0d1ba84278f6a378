/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * The body is the plain-text message from `BackendError::message`. Server
 * errors are logged with their full detail before the generic message is
 * sent; retryable errors add a `Retry-After` header.
 */

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self);
        }

        let mut response = (status, self.message()).into_response();
        if let Some(secs) = self.retry_after() {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
