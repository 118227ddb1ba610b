#![allow(clippy::must_use_candidate)]

mod env;
pub mod generation;
mod loader;
pub mod payments;
pub mod server;
pub mod speech;
pub mod uploads;

use serde::Deserialize;

pub use generation::GenerationConfig;
pub use payments::PaymentsConfig;
pub use server::ServerConfig;
pub use speech::SpeechConfig;
pub use uploads::UploadConfig;

/// Top-level Solace configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Generative backend (chat and transcription) configuration
    #[serde(default)]
    pub generation: Option<GenerationConfig>,
    /// Speech synthesis configuration
    #[serde(default)]
    pub speech: Option<SpeechConfig>,
    /// Upload storage configuration
    #[serde(default)]
    pub uploads: Option<UploadConfig>,
    /// Payment processor configuration
    #[serde(default)]
    pub payments: Option<PaymentsConfig>,
}
