//! Test configuration assembly
//!
//! Builds `Config` values directly, pointing each backend at a mock
//! server and each storage directory at a temp dir owned by the test.

use std::path::Path;

use secrecy::SecretString;
use solace_config::{
    Config, GenerationConfig, PaymentsConfig, ServerConfig, SpeechConfig, UploadConfig,
};
use url::Url;

pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig::default(),
                generation: None,
                speech: None,
                uploads: None,
                payments: None,
            },
        }
    }

    pub fn with_generation(mut self, base_url: Url) -> Self {
        self.config.generation = Some(GenerationConfig {
            api_key: SecretString::from("test-key"),
            model: "gemini-pro".to_owned(),
            base_url: Some(base_url),
        });
        self
    }

    pub fn with_speech(mut self, base_url: Url, output_dir: &Path) -> Self {
        self.config.speech = Some(SpeechConfig {
            api_key: SecretString::from("test-key"),
            base_url: Some(base_url),
            output_dir: output_dir.to_path_buf(),
            default_voice: "en-US-Standard-A".to_owned(),
            default_language: "en-US".to_owned(),
        });
        self
    }

    pub fn with_uploads(mut self, dir: &Path) -> Self {
        self.config.uploads = Some(UploadConfig {
            dir: dir.to_path_buf(),
            ..UploadConfig::default()
        });
        self
    }

    pub fn with_payments(mut self, base_url: Url) -> Self {
        self.config.payments = Some(PaymentsConfig {
            secret_key: SecretString::from("sk_test_key"),
            publishable_key: None,
            webhook_secret: None,
            app_base_url: Url::parse("http://localhost:3000").expect("valid app URL"),
            base_url: Some(base_url),
        });
        self
    }

    pub fn with_webhook_secret(mut self, secret: &str) -> Self {
        let payments = self
            .config
            .payments
            .as_mut()
            .expect("payments must be configured before a webhook secret");
        payments.webhook_secret = Some(SecretString::from(secret.to_owned()));
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
