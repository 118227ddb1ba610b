use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech synthesis configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// API key for the Cloud Text-to-Speech API
    pub api_key: SecretString,
    /// Base URL override, mainly for tests
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Directory where synthesized audio files are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Voice used when the request does not name one
    #[serde(default = "default_voice")]
    pub default_voice: String,
    /// Language code used when the request does not name one
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public/audio")
}

fn default_voice() -> String {
    "en-US-Standard-A".to_owned()
}

fn default_language() -> String {
    "en-US".to_owned()
}
