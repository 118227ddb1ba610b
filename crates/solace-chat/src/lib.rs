#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
pub mod mood;
mod prompt;
mod shaping;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use solace_core::ApiError;
use solace_gemini::{GeminiClient, GenerateRequest, Part};

pub use error::{ChatError, Result};
pub use mood::Mood;

/// Chat request body: a selected mood, a free-text message, or both
/// (mood takes precedence, matching the UI's two entry points)
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Selected mood label (mood-button branch)
    #[serde(default)]
    pub mood: Option<String>,
    /// Free-text message (typed branch)
    #[serde(default)]
    pub message: Option<String>,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Supportive response text
    pub message: String,
    /// Suggested activities
    pub activities: Vec<String>,
    /// Mood tag for the exchange, when one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    /// Music genre suggestion matching the mood tag
    #[serde(rename = "musicGenre", skip_serializing_if = "Option::is_none")]
    pub music_genre: Option<&'static str>,
}

/// Chat capability state
pub struct ChatState {
    client: GeminiClient,
}

/// Build the chat state from configuration
pub fn build_state(config: &solace_config::Config) -> anyhow::Result<Arc<ChatState>> {
    let generation = config
        .generation
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("chat requires the [generation] config section"))?;

    Ok(Arc::new(ChatState {
        client: GeminiClient::new(generation),
    }))
}

/// Create the endpoint router for chat
pub fn endpoint_router() -> Router<Arc<ChatState>> {
    Router::new().route("/api/chat", post(chat))
}

/// Handle chat requests
///
/// Mood branch: prompt from the fixed per-mood profile, no history.
/// Message branch: prompt embeds only the latest message, tagged with the
/// classified mood of that message.
async fn chat(
    State(state): State<Arc<ChatState>>,
    Json(request): Json<ChatRequest>,
) -> std::result::Result<Json<ChatResponse>, ApiError> {
    // An empty or whitespace-only mood counts as absent, so a typed
    // message still reaches the message branch
    let mood_label = request.mood.as_deref().map(str::trim).filter(|label| !label.is_empty());
    let message = request.message.as_deref().map(str::trim).filter(|text| !text.is_empty());

    let response = match (mood_label, message) {
        (Some(label), _) => {
            let mood = Mood::parse(label)
                .ok_or_else(|| ChatError::InvalidRequest(format!("unknown mood '{label}'")))?;
            let profile = mood
                .profile()
                .ok_or_else(|| ChatError::InvalidRequest(format!("mood '{label}' is not selectable")))?;

            tracing::debug!(mood = %mood, "chat mood branch");

            let text = state
                .client
                .generate(&GenerateRequest::single_turn(vec![Part::Text(prompt::mood_prompt(
                    &profile,
                ))]))
                .await
                .map_err(ChatError::Backend)?;

            let reply = shaping::shape_reply(&text)?;
            ChatResponse {
                message: reply.message,
                activities: reply.activities,
                mood: Some(mood),
                music_genre: Some(mood.music_genre()),
            }
        }
        (None, Some(message)) => {
            tracing::debug!("chat message branch");

            let text = state
                .client
                .generate(&GenerateRequest::single_turn(vec![Part::Text(prompt::message_prompt(
                    message,
                ))]))
                .await
                .map_err(ChatError::Backend)?;

            let reply = shaping::shape_reply(&text)?;
            let mood = Mood::classify(message);
            ChatResponse {
                message: reply.message,
                activities: reply.activities,
                mood: Some(mood),
                music_genre: Some(mood.music_genre()),
            }
        }
        (None, None) => {
            return Err(ChatError::InvalidRequest("either 'mood' or 'message' is required".to_owned()).into());
        }
    };

    Ok(Json(response))
}
