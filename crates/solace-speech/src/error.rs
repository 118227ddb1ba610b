use http::StatusCode;
use solace_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpeechError>;

/// Errors from the speech synthesis capability
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Client sent a malformed or incomplete request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request could not be sent to the synthesis backend
    #[error("failed to reach synthesis backend: {0}")]
    Connection(String),

    /// Backend reported resource exhaustion
    #[error("synthesis backend rate limit exceeded")]
    RateLimited,

    /// Backend returned a non-success status
    #[error("synthesis backend returned {status}: {message}")]
    Upstream {
        /// HTTP status from the backend
        status: u16,
        /// Error body from the backend
        message: String,
    },

    /// Backend response audio could not be decoded
    #[error("failed to decode synthesized audio: {0}")]
    Decode(String),

    /// Audio file write failed
    #[error("failed to write audio file: {0}")]
    Storage(#[from] std::io::Error),
}

impl HttpError for SpeechError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Connection(_) | Self::Upstream { .. } | Self::Decode(_) | Self::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::RateLimited => "rate_limit_error",
            Self::Connection(_) | Self::Upstream { .. } => "upstream_error",
            Self::Decode(_) | Self::Storage(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => message.clone(),
            Self::RateLimited => "Rate limit exceeded. Please try again later.".to_owned(),
            Self::Connection(_) | Self::Upstream { .. } | Self::Decode(_) | Self::Storage(_) => {
                "Failed to generate speech".to_owned()
            }
        }
    }
}
