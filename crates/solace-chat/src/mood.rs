//! Mood descriptors and keyword classification
//!
//! Classification is a fixed keyword scan over lowercased text. When a text
//! matches several keyword groups, the first group in [`PRECEDENCE`] wins,
//! so repeated evaluation of the same text is deterministic.

use serde::Serialize;

/// Fixed enumeration of emotional categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Relaxed,
    Stressed,
    Creative,
    Angry,
    Neutral,
}

/// Keyword groups checked in order; first match wins
const PRECEDENCE: &[(Mood, &[&str])] = &[
    (Mood::Happy, &["happy", "joy", "excited", "wonderful", "great", "amazing"]),
    (Mood::Sad, &["sad", "down", "upset", "depressed", "unhappy"]),
    (Mood::Angry, &["angry", "mad", "frustrated", "annoyed"]),
    (Mood::Relaxed, &["relaxed", "calm", "peaceful", "tranquil"]),
    (Mood::Energetic, &["energetic", "pumped", "motivated", "inspired"]),
];

impl Mood {
    /// Classify free text into a mood by keyword match
    ///
    /// Substring match over the lowercased text; falls back to `Neutral`.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();

        for (mood, keywords) in PRECEDENCE {
            if keywords.iter().any(|keyword| lower.contains(keyword)) {
                return *mood;
            }
        }

        Self::Neutral
    }

    /// Parse a client-supplied mood label
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "energetic" => Some(Self::Energetic),
            "relaxed" => Some(Self::Relaxed),
            "stressed" => Some(Self::Stressed),
            "creative" => Some(Self::Creative),
            "angry" => Some(Self::Angry),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Lowercase label for this mood
    pub const fn label(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Energetic => "energetic",
            Self::Relaxed => "relaxed",
            Self::Stressed => "stressed",
            Self::Creative => "creative",
            Self::Angry => "angry",
            Self::Neutral => "neutral",
        }
    }

    /// Music genre suggestion for this mood
    pub const fn music_genre(self) -> &'static str {
        match self {
            Self::Sad => "acoustic",
            Self::Angry => "rock",
            Self::Relaxed => "ambient",
            Self::Energetic => "electronic",
            Self::Happy | Self::Stressed | Self::Creative | Self::Neutral => "pop",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
