use http::StatusCode;
use solace_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploadError>;

/// Errors from the upload capability
#[derive(Debug, Error)]
pub enum UploadError {
    /// No file field in the form
    #[error("No file provided")]
    MissingFile,

    /// MIME type outside the allowed set
    #[error("Invalid file type. Supported types: MP3, WAV, M4A, MP4")]
    UnsupportedType,

    /// File exceeds the size ceiling
    #[error("File too large. Maximum size is 25MB")]
    TooLarge,

    /// Filename has no usable extension
    #[error("Invalid file extension")]
    MissingExtension,

    /// File write failed
    #[error("Error saving file: {0}")]
    Storage(#[from] std::io::Error),
}

impl HttpError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::UnsupportedType | Self::TooLarge | Self::MissingExtension => {
                StatusCode::BAD_REQUEST
            }
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MissingFile | Self::UnsupportedType | Self::TooLarge | Self::MissingExtension => {
                "invalid_request_error"
            }
            Self::Storage(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Storage(_) => "Error saving file".to_owned(),
            other => other.to_string(),
        }
    }
}
