/**
 * Multipart Form Reading
 *
 * Buffers a multipart request into text fields and file parts keyed by
 * field name. File inputs left empty by the browser (no filename, no bytes)
 * are treated as absent.
 */

use std::collections::HashMap;

use axum::extract::{multipart::MultipartError, Multipart};

use crate::backend::error::BackendError;
use crate::backend::uploads::store::UploadedFile;

/// A fully read multipart form
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Read every part of the request
    pub async fn read(mut multipart: Multipart) -> Result<Self, BackendError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(reject)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(reject)?;
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let text = field.text().await.map_err(reject)?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// A text field, trimmed; `None` when missing or blank
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Remove and return a file part
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

fn reject(err: MultipartError) -> BackendError {
    tracing::warn!("Malformed multipart request: {}", err);
    BackendError::handler(err.status(), err.body_text())
}

#[cfg(test)]
impl MultipartForm {
    pub(crate) fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}
