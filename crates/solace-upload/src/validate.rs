//! Pure upload validation
//!
//! No side effects; the handler only touches the filesystem after these
//! checks pass, so a rejected upload never leaves a file behind.

use crate::error::UploadError;

/// MIME types the upload endpoint accepts
pub const ALLOWED_TYPES: &[&str] = &[
    "audio/mpeg",
    "audio/mp3",
    "audio/wav",
    "audio/wave",
    "audio/x-wav",
    "audio/x-m4a",
    "audio/m4a",
    "video/mp4",
    "audio/mp4",
];

/// Validated, normalized upload parameters
#[derive(Debug, PartialEq, Eq)]
pub struct ValidUpload {
    /// Lowercased extension taken from the original filename
    pub extension: String,
}

/// Check MIME type, size, and extension for an upload
///
/// # Errors
///
/// Returns the specific [`UploadError`] kind for the first failed check
pub fn validate(content_type: &str, size: u64, max_size: u64, filename: &str) -> Result<ValidUpload, UploadError> {
    if !ALLOWED_TYPES.contains(&content_type) {
        return Err(UploadError::UnsupportedType);
    }

    if size > max_size {
        return Err(UploadError::TooLarge);
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.chars().all(char::is_alphanumeric))
        .ok_or(UploadError::MissingExtension)?;

    Ok(ValidUpload {
        extension: extension.to_lowercase(),
    })
}
