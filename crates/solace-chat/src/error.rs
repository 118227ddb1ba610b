use http::StatusCode;
use solace_core::HttpError;
use solace_gemini::GeminiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Errors from the chat capability
#[derive(Debug, Error)]
pub enum ChatError {
    /// Client sent a malformed or incomplete request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Model output lacked the expected embedded JSON object
    #[error("model output missing expected JSON object")]
    GenerationFormat,

    /// Generative backend failure
    #[error(transparent)]
    Backend(#[from] GeminiError),
}

impl HttpError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::GenerationFormat => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Backend(inner) => inner.status_code(),
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::GenerationFormat => "generation_format_error",
            Self::Backend(inner) => inner.error_type(),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => format!("invalid request: {message}"),
            // Format failures surface as the same generic message as any
            // other backend failure; detail stays in the logs
            Self::GenerationFormat => "Failed to process request".to_owned(),
            Self::Backend(inner) => inner.client_message(),
        }
    }
}
