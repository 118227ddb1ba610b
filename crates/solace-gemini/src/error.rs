use http::StatusCode;
use solace_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors from the generative backend
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Request could not be sent
    #[error("failed to reach generative backend: {0}")]
    Connection(String),

    /// Backend reported resource exhaustion
    #[error("generative backend rate limit exceeded")]
    RateLimited,

    /// Backend returned a non-success status
    #[error("generative backend returned {status}: {message}")]
    Upstream {
        /// HTTP status from the backend
        status: u16,
        /// Error body from the backend
        message: String,
    },

    /// Backend response carried no usable text
    #[error("generative backend returned an empty response")]
    EmptyResponse,
}

impl HttpError for GeminiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Connection(_) | Self::Upstream { .. } | Self::EmptyResponse => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::RateLimited => "rate_limit_error",
            Self::Connection(_) | Self::Upstream { .. } | Self::EmptyResponse => "upstream_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::RateLimited => "Rate limit exceeded. Please try again later.".to_owned(),
            // Vendor detail stays in the logs
            Self::Connection(_) | Self::Upstream { .. } | Self::EmptyResponse => {
                "Failed to process request".to_owned()
            }
        }
    }
}
