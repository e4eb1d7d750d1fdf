//! Naming and validation of uploaded images.
//!
//! Images are stored under the media root as `<kind>/<slug>-<uuid>.<ext>`,
//! where `slug` derives from the owning entity's name. The relative path is
//! what gets persisted in the entity's `image` column.

use image::ImageFormat;
use uuid::Uuid;

use crate::error::CoreError;

/// Accepted image file extensions (lower-case).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Directory holding station images.
pub const STATION_IMAGE_DIR: &str = "stations";

/// Directory holding train images.
pub const TRAIN_IMAGE_DIR: &str = "trains";

/// Turn a display name into a lower-case, hyphen-separated file stem.
///
/// Non-alphanumeric runs collapse into a single `-`; an empty result
/// becomes `image`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("image");
    }
    slug
}

/// Extract and validate the extension of an uploaded file name.
pub fn image_extension(file_name: &str) -> Result<String, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// Validate an upload: the extension must be accepted and the content must
/// be an image of the format that extension names. Returns the extension.
pub fn validate_image(file_name: &str, data: &[u8]) -> Result<String, CoreError> {
    let ext = image_extension(file_name)?;
    let detected = image::guess_format(data).ok();
    if detected.is_none() || detected != ImageFormat::from_extension(&ext) {
        return Err(CoreError::Validation(
            "Upload a valid image. The file you uploaded was either not an image or a corrupted image."
                .into(),
        ));
    }
    Ok(ext)
}

/// Relative storage path for a new image of an entity named `name`, with an
/// extension already checked by [`validate_image`].
pub fn image_path(dir: &str, name: &str, ext: &str) -> String {
    format!("{dir}/{}-{}.{ext}", slugify(name), Uuid::new_v4())
}
