//! Async HTTP client for the Stripe Checkout API
//!
//! Form-encoded requests against the two endpoints this application uses:
//! session creation and session retrieval. No retries; vendor failures are
//! reported to the caller as-is.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::PaymentError;
use crate::types::CheckoutSession;

/// Default Stripe API base URL
const DEFAULT_BASE_URL: &str = "https://api.stripe.com";

/// Parameters for creating a checkout session
#[derive(Debug)]
pub struct CreateSessionParams {
    /// Product name shown at checkout
    pub product_name: String,
    /// Product description shown at checkout
    pub product_description: String,
    /// Lowercase ISO currency code
    pub currency: String,
    /// Amount in the currency's smallest unit (cents)
    pub unit_amount: i64,
    /// Redirect on success
    pub success_url: String,
    /// Redirect on cancel
    pub cancel_url: String,
    /// Metadata tags for later verification
    pub metadata: Vec<(String, String)>,
}

/// Client for the Stripe API
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    base_url: Url,
    secret_key: SecretString,
}

impl StripeClient {
    /// Create a client from payments configuration
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(config: &solace_config::PaymentsConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        Self {
            http: reqwest::Client::new(),
            base_url,
            secret_key: config.secret_key.clone(),
        }
    }

    /// Create a checkout session
    ///
    /// POST `/v1/checkout/sessions`
    pub async fn create_checkout_session(&self, params: &CreateSessionParams) -> crate::error::Result<CheckoutSession> {
        let url = self.endpoint("v1/checkout/sessions")?;

        let mut form: Vec<(String, String)> = vec![
            ("payment_method_types[0]".into(), "card".into()),
            ("mode".into(), "payment".into()),
            ("line_items[0][quantity]".into(), "1".into()),
            ("line_items[0][price_data][currency]".into(), params.currency.clone()),
            (
                "line_items[0][price_data][unit_amount]".into(),
                params.unit_amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                params.product_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]".into(),
                params.product_description.clone(),
            ),
            ("success_url".into(), params.success_url.clone()),
            ("cancel_url".into(), params.cancel_url.clone()),
        ];

        for (key, value) in &params.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        let response = self
            .http
            .post(url)
            .bearer_auth(self.secret_key.expose_secret())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "checkout session request failed");
                PaymentError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(%status, "stripe returned error on session create");
            return Err(PaymentError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| PaymentError::Upstream {
            status: status.as_u16(),
            message: format!("failed to parse response: {e}"),
        })
    }

    /// Retrieve a checkout session by id
    ///
    /// GET `/v1/checkout/sessions/:id`; an unknown id maps to
    /// [`PaymentError::SessionNotFound`]
    pub async fn retrieve_checkout_session(&self, session_id: &str) -> crate::error::Result<CheckoutSession> {
        // Session ids are `cs_...` tokens; anything else cannot name a
        // session and would alter the request path if interpolated
        if !is_valid_session_id(session_id) {
            return Err(PaymentError::SessionNotFound);
        }

        let url = self.endpoint(&format!("v1/checkout/sessions/{session_id}"))?;

        let response = self
            .http
            .get(url)
            .bearer_auth(self.secret_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session retrieve request failed");
                PaymentError::Connection(e.to_string())
            })?;

        let status = response.status();

        if status == http::StatusCode::NOT_FOUND {
            return Err(PaymentError::SessionNotFound);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(%status, "stripe returned error on session retrieve");
            return Err(PaymentError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| PaymentError::Upstream {
            status: status.as_u16(),
            message: format!("failed to parse response: {e}"),
        })
    }

    fn endpoint(&self, path: &str) -> crate::error::Result<Url> {
        self.base_url.join(path).map_err(|e| PaymentError::Upstream {
            status: 0,
            message: format!("invalid URL: {e}"),
        })
    }
}

/// Whether a client-supplied session id is a plausible Stripe token
fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.is_empty() && session_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
