#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Client for the Google Generative Language API
//!
//! Shared by the chat and transcription capabilities, which both delegate
//! to the same Gemini backend.

mod client;
mod error;
mod http_client;
mod protocol;

pub use client::GeminiClient;
pub use error::{GeminiError, Result};
pub use protocol::{Content, GenerateRequest, GenerateResponse, GenerationConfig, InlineData, Part};
