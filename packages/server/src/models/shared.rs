use std::collections::HashSet;

use common::ImageRef;

use crate::error::AppError;

/// Maximum characters in a project title.
pub const MAX_TITLE_CHARS: usize = 256;

/// Validate a project title: may be empty, at most 256 Unicode characters.
pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "Title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validate an ordered ID list for reorder operations (non-empty, no duplicates).
pub fn validate_reorder_ids(ids: &[String], name: &str) -> Result<(), AppError> {
    if ids.is_empty() {
        return Err(AppError::Validation(format!("{name}s must not be empty")));
    }
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate {name} {id} in reorder list"
            )));
        }
    }
    Ok(())
}

/// Validate incoming image references: non-empty id and url, ids unique within the batch.
pub fn validate_images(images: &[ImageRef]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for image in images {
        if image.id.trim().is_empty() {
            return Err(AppError::Validation("Image id must not be empty".into()));
        }
        if image.url.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Image {} must have a url",
                image.id
            )));
        }
        if !seen.insert(image.id.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate image id {}",
                image.id
            )));
        }
    }
    Ok(())
}
