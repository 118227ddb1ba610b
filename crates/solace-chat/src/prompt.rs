//! Prompt templates for the companion chat

use crate::mood::Mood;

/// Per-mood prompt context for the selectable moods
pub struct MoodProfile {
    /// Situation framing inserted into the prompt
    pub context: &'static str,
    /// Tone the response should adopt
    pub tone: &'static str,
}

impl Mood {
    /// Prompt profile for this mood
    ///
    /// Only the six moods selectable in the UI carry a profile; `angry` and
    /// `neutral` exist for classification output only.
    pub const fn profile(self) -> Option<MoodProfile> {
        match self {
            Self::Happy => Some(MoodProfile {
                context: "The user is feeling happy and positive. Let's suggest activities that maintain and enhance this mood.",
                tone: "upbeat and encouraging",
            }),
            Self::Sad => Some(MoodProfile {
                context: "The user is feeling sad. Let's suggest uplifting and comforting activities.",
                tone: "empathetic and gentle",
            }),
            Self::Energetic => Some(MoodProfile {
                context: "The user is feeling energetic. Let's suggest activities that channel this energy productively.",
                tone: "dynamic and enthusiastic",
            }),
            Self::Relaxed => Some(MoodProfile {
                context: "The user is feeling relaxed. Let's suggest activities that maintain this peaceful state.",
                tone: "calm and soothing",
            }),
            Self::Stressed => Some(MoodProfile {
                context: "The user is feeling stressed. Let's suggest calming and stress-relieving activities.",
                tone: "supportive and reassuring",
            }),
            Self::Creative => Some(MoodProfile {
                context: "The user is feeling creative. Let's suggest activities that nurture this creative energy.",
                tone: "inspiring and imaginative",
            }),
            Self::Angry | Self::Neutral => None,
        }
    }
}

/// Prompt for the mood-selection branch (no message history is passed)
pub fn mood_prompt(profile: &MoodProfile) -> String {
    format!(
        r#"As a supportive AI companion focusing on emotional well-being and activity recommendations:

{context}

Please provide:
1. A supportive response in a {tone} tone
2. A list of 3-4 specific, mood-appropriate activities

Format the response as a JSON object with:
{{
  "message": "your supportive response",
  "activities": ["activity 1", "activity 2", "activity 3"]
}}

Keep the message concise but warm, and make the activities specific and actionable."#,
        context = profile.context,
        tone = profile.tone,
    )
}

/// Prompt for the free-text branch
pub fn message_prompt(message: &str) -> String {
    format!(
        r#"As a supportive AI companion focusing on emotional well-being, respond to this message: "{message}"

Analyze the emotional content and provide:
1. An empathetic and supportive response
2. 2-3 relevant activity suggestions based on the emotional context

Format the response as a JSON object with:
{{
  "message": "your supportive response",
  "activities": ["activity 1", "activity 2"]
}}

Keep the message concise but warm, and make the activities specific and actionable."#
    )
}
