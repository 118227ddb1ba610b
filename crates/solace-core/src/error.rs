use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each capability crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// An HTTP error ready to be rendered as a JSON response body
///
/// Every route handler returns `Result<_, ApiError>`; the response body is
/// always `{"error": "<message>"}` with the mapped status. Conversion from
/// any [`HttpError`] keeps only the sanitized client message; handlers log
/// the full error before converting when the detail matters.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E: HttpError> From<E> for ApiError {
    fn from(error: E) -> Self {
        Self {
            status: error.status_code(),
            message: error.client_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, axum::Json(body)).into_response()
    }
}
