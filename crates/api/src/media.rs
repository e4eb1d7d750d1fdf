//! Storage of uploaded images under the configured media root.

use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use railway_core::media::{image_path, validate_image};

use crate::error::{AppError, AppResult};

/// Multipart field carrying the uploaded file.
pub const IMAGE_FIELD: &str = "image";

/// An image read from a multipart request.
#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub data: Bytes,
}

/// Read the `image` field from a multipart body. Other fields are ignored.
pub async fn read_image(multipart: &mut Multipart) -> AppResult<UploadedImage> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        image = Some(UploadedImage { file_name, data });
    }

    let image =
        image.ok_or_else(|| AppError::BadRequest(format!("Missing required '{IMAGE_FIELD}' field")))?;
    if image.data.is_empty() {
        return Err(AppError::BadRequest("Uploaded image is empty".into()));
    }
    Ok(image)
}

/// Write `image` below `media_root/dir`, named after `owner_name`.
///
/// Returns the path relative to the media root, suitable for the entity's
/// `image` column and for serving under `/media`.
pub async fn store_image(
    media_root: &Path,
    dir: &str,
    owner_name: &str,
    image: &UploadedImage,
) -> AppResult<String> {
    let ext = validate_image(&image.file_name, &image.data)?;
    let relative = image_path(dir, owner_name, &ext);
    let full_path = media_root.join(&relative);
    if let Some(parent) = full_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
    }
    tokio::fs::write(&full_path, &image.data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!(path = %relative, bytes = image.data.len(), "Image stored");
    Ok(relative)
}

/// Remove a stored image. Failures are logged, not returned.
pub async fn remove_image(media_root: &Path, relative: &str) {
    if let Err(e) = tokio::fs::remove_file(media_root.join(relative)).await {
        tracing::warn!(path = %relative, error = %e, "Failed to remove image");
    }
}

/// Remove a just-stored image when recording it on its entity failed, then
/// pass `result` through.
pub async fn discard_on_error<T>(
    media_root: &Path,
    relative: &str,
    result: AppResult<T>,
) -> AppResult<T> {
    if result.is_err() {
        remove_image(media_root, relative).await;
    }
    result
}
