//! Generative Language API wire format types
//!
//! Subset of the `generateContent` request/response shapes used by this
//! application (text and inline audio parts, no tools, no streaming).

use serde::{Deserialize, Serialize};

/// `generateContent` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Conversation contents
    pub contents: Vec<Content>,
    /// Generation tuning parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Build a single-turn user request from content parts
    pub fn single_turn(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_owned()),
                parts,
            }],
            generation_config: None,
        }
    }
}

/// Content object containing role and parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role ("user" or "model")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    pub parts: Vec<Part>,
}

/// Individual part within a content object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    /// Text content
    Text(String),
    /// Inline binary data (e.g. audio)
    InlineData(InlineData),
}

/// Inline base64-encoded binary data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type (e.g. "audio/wav")
    pub mime_type: String,
    /// Base64-encoded data
    pub data: String,
}

/// Generation tuning parameters
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// `generateContent` response
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Response candidates (usually one)
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// A single response candidate
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's text parts
    ///
    /// Returns `None` when the response carries no candidates or no text
    /// parts, which callers report as an upstream failure.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;

        let mut text = String::new();
        for part in &content.parts {
            if let Part::Text(fragment) = part {
                text.push_str(fragment);
            }
        }

        if text.is_empty() { None } else { Some(text) }
    }
}
