//! Coarse text statistics and language guessing for transcripts
//!
//! Pure functions, computed once per transcription and never persisted.

use serde::Serialize;

/// Word, sentence, and paragraph counts for a transcript
///
/// Serialized camelCase to match the shape the web client consumes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
}

/// Guessed language with a rough confidence
#[derive(Debug, Serialize)]
pub struct LanguageGuess {
    /// ISO 639-1 code
    pub code: &'static str,
    /// Fraction of stopword hits attributed to the guessed language
    pub confidence: f64,
}

/// Average speaking rate used for duration estimates
const WORDS_PER_MINUTE: f64 = 150.0;

/// Compute word, sentence, and paragraph counts
pub fn text_statistics(text: &str) -> TextStatistics {
    let word_count = text.split_whitespace().count();

    let sentence_count = text
        .split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count();

    let paragraph_count = text
        .split("\n\n")
        .filter(|paragraph| !paragraph.trim().is_empty())
        .count();

    TextStatistics {
        word_count,
        sentence_count,
        paragraph_count,
    }
}

/// Estimate spoken duration in seconds from the word count
pub fn estimated_duration_seconds(word_count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let words = word_count as f64;
    (words / WORDS_PER_MINUTE * 60.0).round()
}

/// Stopword lists per supported language
const STOPWORDS: &[(&str, &[&str])] = &[
    ("en", &["the", "and", "is", "are", "was", "of", "to", "in", "it", "that"]),
    ("es", &["el", "la", "los", "las", "es", "de", "que", "en", "un", "una"]),
    ("fr", &["le", "la", "les", "est", "de", "que", "un", "une", "et", "dans"]),
    ("de", &["der", "die", "das", "ist", "und", "ein", "eine", "nicht", "mit", "ich"]),
];

/// Guess the transcript language by stopword frequency
///
/// Defaults to English with 0.5 confidence when no stopwords match at all,
/// so the field is always present for the client.
pub fn guess_language(text: &str) -> LanguageGuess {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    let mut best: Option<(&'static str, usize)> = None;
    let mut total_hits = 0usize;

    for (code, stopwords) in STOPWORDS {
        let hits = words.iter().filter(|word| stopwords.contains(*word)).count();
        total_hits += hits;
        if hits > 0 && best.is_none_or(|(_, best_hits)| hits > best_hits) {
            best = Some((code, hits));
        }
    }

    match best {
        #[allow(clippy::cast_precision_loss)]
        Some((code, hits)) => LanguageGuess {
            code,
            confidence: hits as f64 / total_hits as f64,
        },
        None => LanguageGuess {
            code: "en",
            confidence: 0.5,
        },
    }
}
