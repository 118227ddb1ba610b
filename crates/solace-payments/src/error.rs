use http::StatusCode;
use solace_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors from the payments capability
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Client sent a malformed or incomplete request
    #[error("{0}")]
    InvalidRequest(String),

    /// Checkout session does not exist
    #[error("Session not found")]
    SessionNotFound,

    /// Session exists but its payment is not completed
    #[error("Payment not completed")]
    NotPaid,

    /// Session exists but is not tagged as a donation
    #[error("Invalid session type")]
    NotDonation,

    /// Webhook signature or payload could not be verified
    #[error("webhook verification failed: {0}")]
    WebhookVerification(String),

    /// Request could not be sent to the payment processor
    #[error("failed to reach payment processor: {0}")]
    Connection(String),

    /// Payment processor returned a non-success status
    #[error("payment processor returned {status}: {message}")]
    Upstream {
        /// HTTP status from the processor
        status: u16,
        /// Error body from the processor
        message: String,
    },
}

impl HttpError for PaymentError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::NotPaid | Self::NotDonation | Self::WebhookVerification(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::SessionNotFound => StatusCode::NOT_FOUND,
            Self::Connection(_) | Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::SessionNotFound => "not_found_error",
            Self::NotPaid | Self::NotDonation => "verification_error",
            Self::WebhookVerification(_) => "webhook_verification_error",
            Self::Connection(_) | Self::Upstream { .. } => "upstream_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::WebhookVerification(_) => "Webhook handler failed".to_owned(),
            // Processor detail stays in the logs
            Self::Connection(_) | Self::Upstream { .. } => "Payment processor request failed".to_owned(),
            other => other.to_string(),
        }
    }
}
