use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Generative backend configuration
///
/// A single Gemini-compatible backend serves both chat generation and
/// audio transcription.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// API key for the Generative Language API
    pub api_key: SecretString,
    /// Model identifier (e.g. "gemini-pro")
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL override, mainly for tests
    #[serde(default)]
    pub base_url: Option<Url>,
}

fn default_model() -> String {
    "gemini-pro".to_owned()
}
