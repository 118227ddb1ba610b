use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::GeminiError;
use crate::http_client::http_client;
use crate::protocol::{GenerateRequest, GenerateResponse};

/// Default Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Generative Language `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    model: String,
}

impl GeminiClient {
    /// Create a client from generation configuration
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(config: &solace_config::GenerationConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        Self {
            client: http_client(),
            base_url,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Build the `generateContent` endpoint URL for the configured model
    fn generate_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!(
            "{base}/models/{}:generateContent?key={}",
            self.model,
            self.api_key.expose_secret()
        )
    }

    /// Send a `generateContent` request and return the response text
    ///
    /// No retries: a backend failure is reported to the caller as-is.
    pub async fn generate(&self, request: &GenerateRequest) -> crate::error::Result<String> {
        let url = self.generate_url();

        tracing::debug!(model = %self.model, "generateContent request");

        let response = self.client.post(&url).json(request).send().await.map_err(|e| {
            tracing::error!(model = %self.model, error = %e, "upstream request failed");
            GeminiError::Connection(e.to_string())
        })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, status = %status, "upstream returned error");

            return Err(if status == http::StatusCode::TOO_MANY_REQUESTS {
                GeminiError::RateLimited
            } else {
                GeminiError::Upstream {
                    status: status.as_u16(),
                    message: body,
                }
            });
        }

        let wire_response: GenerateResponse = response.json().await.map_err(|e| GeminiError::Upstream {
            status: status.as_u16(),
            message: format!("failed to parse response: {e}"),
        })?;

        wire_response.text().ok_or(GeminiError::EmptyResponse)
    }
}
