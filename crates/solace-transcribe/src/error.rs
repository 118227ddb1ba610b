use http::StatusCode;
use solace_core::HttpError;
use solace_gemini::GeminiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscribeError>;

/// Errors from the transcription capability
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// Client sent a malformed or incomplete request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Temp-file write failed
    #[error("failed to store audio file: {0}")]
    Storage(#[from] std::io::Error),

    /// Generative backend failure
    #[error(transparent)]
    Backend(#[from] GeminiError),
}

impl HttpError for TranscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Backend(inner) => inner.status_code(),
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Storage(_) => "internal_error",
            Self::Backend(inner) => inner.error_type(),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => message.clone(),
            Self::Storage(_) => "Internal server error".to_owned(),
            Self::Backend(_) => "Failed to process audio".to_owned(),
        }
    }
}
