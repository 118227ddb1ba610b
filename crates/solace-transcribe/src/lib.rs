#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod extract;
pub mod stats;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use base64::Engine as _;
use serde::Serialize;
use solace_core::ApiError;
use solace_gemini::{GeminiClient, GenerateRequest, InlineData, Part};

pub use error::{Result, TranscribeError};
pub use extract::{ALLOWED_TYPES, AudioUpload};
use extract::ExtractAudio;

/// Prompt sent alongside the audio
const TRANSCRIBE_PROMPT: &str = "Please transcribe this audio file and provide a summary of its content.";

/// Transcription response body
#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    /// Transcribed text
    pub transcription: String,
    /// Summary of the content
    pub summary: String,
    /// Original filename
    pub filename: String,
    /// Estimated duration in seconds
    pub duration: f64,
    /// Derived metadata for the client
    pub metadata: TranscriptionMetadata,
}

/// Language guess and text statistics for a transcript
#[derive(Debug, Serialize)]
pub struct TranscriptionMetadata {
    pub language: stats::LanguageGuess,
    pub statistics: stats::TextStatistics,
}

/// Transcription capability state
pub struct TranscribeState {
    client: GeminiClient,
    temp_dir: PathBuf,
}

/// Build the transcription state from configuration
pub fn build_state(config: &solace_config::Config) -> anyhow::Result<Arc<TranscribeState>> {
    let generation = config
        .generation
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("transcription requires the [generation] config section"))?;

    Ok(Arc::new(TranscribeState {
        client: GeminiClient::new(generation),
        temp_dir: std::env::temp_dir(),
    }))
}

/// Create the endpoint router for transcription
pub fn endpoint_router() -> Router<Arc<TranscribeState>> {
    Router::new().route("/api/transcribe", post(transcribe))
}

/// Handle transcription requests
///
/// Validates the MIME type, saves the audio to a temp path, then sends it
/// to the generative backend as an inline-data part. Statistics, language
/// guess, and duration estimate are derived from the transcript.
async fn transcribe(
    State(state): State<Arc<TranscribeState>>,
    ExtractAudio(upload): ExtractAudio,
) -> std::result::Result<Json<TranscriptionResponse>, ApiError> {
    if !ALLOWED_TYPES.contains(&upload.content_type.as_str()) {
        return Err(TranscribeError::InvalidRequest(
            "Invalid file type. Only WAV, MP3, and WebM files are supported.".to_owned(),
        )
        .into());
    }

    tracing::debug!(
        filename = %upload.filename,
        content_type = %upload.content_type,
        size = upload.audio.len(),
        "transcription request"
    );

    // Strip any path components a hostile client put in the filename
    let safe_name = std::path::Path::new(&upload.filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("audio.wav");

    let temp_path = state.temp_dir.join(format!("upload-{}-{safe_name}", uuid::Uuid::new_v4()));
    tokio::fs::write(&temp_path, &upload.audio)
        .await
        .map_err(TranscribeError::Storage)?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(&upload.audio);
    let request = GenerateRequest::single_turn(vec![
        Part::Text(TRANSCRIBE_PROMPT.to_owned()),
        Part::InlineData(InlineData {
            mime_type: upload.content_type.clone(),
            data: encoded,
        }),
    ]);

    let text = state.client.generate(&request).await.map_err(TranscribeError::Backend)?;

    tracing::debug!("transcription complete");

    let statistics = stats::text_statistics(&text);
    let duration = stats::estimated_duration_seconds(statistics.word_count);
    let language = stats::guess_language(&text);

    Ok(Json(TranscriptionResponse {
        // The backend returns transcription and summary as one text
        summary: text.clone(),
        transcription: text,
        filename: upload.filename,
        duration,
        metadata: TranscriptionMetadata { language, statistics },
    }))
}
