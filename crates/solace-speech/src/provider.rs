//! Cloud Text-to-Speech REST adapter

use base64::Engine as _;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SpeechError;

/// Default Cloud Text-to-Speech API base URL
const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com/v1";

/// Client for the Cloud Text-to-Speech `text:synthesize` endpoint
pub struct SpeechSynthesizer {
    client: Client,
    base_url: Url,
    api_key: SecretString,
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig<'a>,
}

#[derive(Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    language_code: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct AudioConfig<'a> {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'a str,
}

#[derive(Deserialize)]
struct SynthesizeResponse {
    /// Base64-encoded audio bytes
    #[serde(rename = "audioContent")]
    audio_content: String,
}

impl SpeechSynthesizer {
    /// Create a synthesizer from speech configuration
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub fn new(config: &solace_config::SpeechConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL).expect("valid default URL"));

        Self {
            client: Client::new(),
            base_url,
            api_key: config.api_key.clone(),
        }
    }

    /// Synthesize text into MP3 audio bytes
    ///
    /// # Errors
    ///
    /// Returns a [`SpeechError`] on transport failure, a non-success vendor
    /// status (429 mapped to `RateLimited`), or an undecodable audio payload
    pub async fn synthesize(&self, text: &str, voice: &str, language_code: &str) -> crate::error::Result<Vec<u8>> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{base}/text:synthesize?key={}", self.api_key.expose_secret());

        tracing::debug!(voice, language_code, input_len = text.len(), "speech synthesis request");

        let body = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code,
                name: voice,
            },
            audio_config: AudioConfig { audio_encoding: "MP3" },
        };

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            tracing::error!(error = %e, "speech synthesis request failed");
            SpeechError::Connection(e.to_string())
        })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_owned());
            tracing::error!(%status, "speech synthesis API error");

            return Err(if status == http::StatusCode::TOO_MANY_REQUESTS {
                SpeechError::RateLimited
            } else {
                SpeechError::Upstream {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let wire: SynthesizeResponse = response.json().await.map_err(|e| SpeechError::Upstream {
            status: status.as_u16(),
            message: format!("failed to parse response: {e}"),
        })?;

        base64::engine::general_purpose::STANDARD
            .decode(wire.audio_content)
            .map_err(|e| SpeechError::Decode(e.to_string()))
    }
}
