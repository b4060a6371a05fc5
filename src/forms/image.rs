use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use thiserror::Error;

use crate::storage::ImageUpload;

/// Content types accepted by both image endpoints, compared case-insensitively.
pub const PERMITTED_IMAGE_CONTENT_TYPES: [&str; 4] =
    ["image/png", "image/jpg", "image/jpeg", "image/gif"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageUploadError {
    #[error("no file part was sent")]
    Missing,
    #[error("uploaded file is empty")]
    Empty,
    #[error("upload has no content type")]
    UnknownContentType,
    #[error("content type {0} is not an accepted image type")]
    UnsupportedContentType(String),
}

/// Multipart body of `PATCH /api/clientes/imagen/{id}`.
#[derive(MultipartForm)]
pub struct ClienteImagenForm {
    #[multipart(limit = "10MB")]
    pub imagen: Option<TempFile>,
}

/// Multipart body of `PATCH {api-version}/vehiculos/image/{id}`.
#[derive(MultipartForm)]
pub struct VehiculoImageForm {
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

/// Returns the accepted content type matching `content_type`, ignoring case.
pub fn permitted_content_type(content_type: &str) -> Option<&'static str> {
    let normalized = content_type.trim().to_lowercase();
    PERMITTED_IMAGE_CONTENT_TYPES
        .iter()
        .copied()
        .find(|permitted| *permitted == normalized)
}

/// Checks presence, size and content type of an uploaded image part.
pub fn inspect_upload(file: Option<&TempFile>) -> Result<ImageUpload<'_>, ImageUploadError> {
    let file = file.ok_or(ImageUploadError::Missing)?;
    if file.size == 0 {
        return Err(ImageUploadError::Empty);
    }

    let declared = file
        .content_type
        .as_ref()
        .map(|mime| mime.essence_str())
        .filter(|value| !value.is_empty())
        .ok_or(ImageUploadError::UnknownContentType)?;

    let content_type = permitted_content_type(declared)
        .ok_or_else(|| ImageUploadError::UnsupportedContentType(declared.to_string()))?;

    Ok(ImageUpload {
        path: file.file.path(),
        content_type,
        size: file.size,
    })
}
