#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use solace_core::ApiError;

pub use error::{Result, SpeechError};
pub use provider::SpeechSynthesizer;

/// Speech synthesis request body
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize
    pub text: String,
    /// Voice name override
    #[serde(default)]
    pub voice: Option<String>,
    /// Language code override
    #[serde(default, rename = "languageCode")]
    pub language_code: Option<String>,
}

/// Speech synthesis response body
#[derive(Debug, Serialize)]
pub struct SpeechResponse {
    pub success: bool,
    /// Relative URL of the written audio file
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
    pub message: String,
}

/// Speech capability state
pub struct SpeechState {
    synthesizer: SpeechSynthesizer,
    output_dir: PathBuf,
    default_voice: String,
    default_language: String,
}

impl SpeechState {
    /// Directory synthesized audio is written to
    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }
}

/// Build the speech state from configuration
pub fn build_state(config: &solace_config::Config) -> anyhow::Result<Arc<SpeechState>> {
    let speech = config
        .speech
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("speech synthesis requires the [speech] config section"))?;

    Ok(Arc::new(SpeechState {
        synthesizer: SpeechSynthesizer::new(speech),
        output_dir: speech.output_dir.clone(),
        default_voice: speech.default_voice.clone(),
        default_language: speech.default_language.clone(),
    }))
}

/// Create the endpoint router for speech synthesis
pub fn endpoint_router() -> Router<Arc<SpeechState>> {
    Router::new().route("/api/text-to-speech", post(synthesize))
}

/// Handle speech synthesis requests
///
/// Writes the synthesized MP3 under a generated unique name so concurrent
/// requests cannot collide, and returns its relative URL.
async fn synthesize(
    State(state): State<Arc<SpeechState>>,
    Json(request): Json<SpeechRequest>,
) -> std::result::Result<Json<SpeechResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(SpeechError::InvalidRequest("Text is required".to_owned()).into());
    }

    let voice = request.voice.as_deref().unwrap_or(&state.default_voice);
    let language_code = request.language_code.as_deref().unwrap_or(&state.default_language);

    let audio = state.synthesizer.synthesize(&request.text, voice, language_code).await?;

    let file_name = format!("{}.mp3", uuid::Uuid::new_v4());
    let output_path = state.output_dir.join(&file_name);

    tokio::fs::create_dir_all(&state.output_dir)
        .await
        .map_err(SpeechError::Storage)?;
    tokio::fs::write(&output_path, &audio).await.map_err(SpeechError::Storage)?;

    tracing::debug!(path = %output_path.display(), bytes = audio.len(), "audio file written");

    Ok(Json(SpeechResponse {
        success: true,
        audio_url: format!("/audio/{file_name}"),
        message: "Audio file created successfully".to_owned(),
    }))
}
