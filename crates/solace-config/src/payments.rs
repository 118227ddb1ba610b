use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Payment processor (Stripe) configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentsConfig {
    /// Stripe secret key
    pub secret_key: SecretString,
    /// Stripe publishable key, surfaced to clients out of band
    #[serde(default)]
    pub publishable_key: Option<String>,
    /// Webhook signing secret; when absent, unsigned webhook events are
    /// accepted (development fallback)
    #[serde(default)]
    pub webhook_secret: Option<SecretString>,
    /// Public base URL of the application, used for checkout redirects
    pub app_base_url: Url,
    /// Stripe API base URL override, mainly for tests
    #[serde(default)]
    pub base_url: Option<Url>,
}
