//! Response shaping for generative-text output
//!
//! The backend is asked to reply with a JSON object embedded in free text.
//! Shaping extracts the first balanced `{...}` span and parses it; a missing
//! or unparsable span is a format error, never a silent default.

use serde::Deserialize;

use crate::error::ChatError;

/// Structured reply extracted from model output
#[derive(Debug, Deserialize)]
pub struct ShapedReply {
    /// Supportive response text
    pub message: String,
    /// Suggested activities
    pub activities: Vec<String>,
}

/// Extract the first balanced `{...}` span from free text
///
/// Balanced-brace scanning (string literals respected) rather than a greedy
/// regex, so trailing prose after the object cannot break parsing.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse model output into a [`ShapedReply`]
///
/// # Errors
///
/// Returns [`ChatError::GenerationFormat`] when no balanced span exists or
/// the span is not the expected object.
pub fn shape_reply(text: &str) -> Result<ShapedReply, ChatError> {
    let span = extract_json_span(text).ok_or(ChatError::GenerationFormat)?;
    serde_json::from_str(span).map_err(|e| {
        tracing::warn!(error = %e, "model output span failed to parse");
        ChatError::GenerationFormat
    })
}
