use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from a raw TOML string
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable expansion fails, TOML
    /// parsing fails, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Required secrets are checked here so a missing key fails at startup
    /// with a descriptive error instead of mid-request.
    ///
    /// # Errors
    ///
    /// Returns an error if no capability is configured or a configured
    /// section lacks its secret
    pub fn validate(&self) -> anyhow::Result<()> {
        let has_generation = self.generation.is_some();
        let has_speech = self.speech.is_some();
        let has_uploads = self.uploads.is_some();
        let has_payments = self.payments.is_some();

        if !has_generation && !has_speech && !has_uploads && !has_payments {
            anyhow::bail!(
                "at least one capability must be configured (generation, speech, uploads, or payments)"
            );
        }

        if let Some(ref generation) = self.generation
            && generation.api_key.expose_secret().is_empty()
        {
            anyhow::bail!("generation.api_key must not be empty");
        }

        if let Some(ref speech) = self.speech
            && speech.api_key.expose_secret().is_empty()
        {
            anyhow::bail!("speech.api_key must not be empty");
        }

        if let Some(ref payments) = self.payments {
            if payments.secret_key.expose_secret().is_empty() {
                anyhow::bail!("payments.secret_key must not be empty");
            }
            if payments
                .webhook_secret
                .as_ref()
                .is_some_and(|secret| secret.expose_secret().is_empty())
            {
                anyhow::bail!("payments.webhook_secret must not be empty when set");
            }
        }

        Ok(())
    }
}
