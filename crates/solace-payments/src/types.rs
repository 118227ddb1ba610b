//! Stripe wire types (the subset this application reads)

use std::collections::HashMap;

use serde::Deserialize;

/// A Checkout Session as returned by the Stripe API
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Session identifier (`cs_...`)
    pub id: String,
    /// Hosted checkout URL, absent once the session completes
    #[serde(default)]
    pub url: Option<String>,
    /// Payment status ("paid", "unpaid", "no_payment_required")
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Customer identifier, if one was created
    #[serde(default)]
    pub customer: Option<String>,
    /// Customer details captured at checkout
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    /// Metadata set when the session was created
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    /// Whether this session is tagged as one of our donation sessions
    pub fn is_donation(&self) -> bool {
        self.metadata.get("type").is_some_and(|tag| tag == "donation")
    }

    /// Whether the payment completed
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some("paid")
    }
}

/// Customer details embedded in a session
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

/// A webhook event envelope
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    /// Event type (e.g. "checkout.session.completed")
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload
    pub data: WebhookEventData,
}

/// Payload wrapper inside a webhook event
#[derive(Debug, Deserialize)]
pub struct WebhookEventData {
    /// The API object the event describes
    pub object: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn donation_tag_checks_metadata() {
        let session: CheckoutSession = serde_json::from_str(
            r#"{"id":"cs_1","payment_status":"paid","metadata":{"type":"donation","amount":"10"}}"#,
        )
        .unwrap();
        assert!(session.is_donation());
        assert!(session.is_paid());
    }

    #[test]
    fn missing_metadata_is_not_a_donation() {
        let session: CheckoutSession = serde_json::from_str(r#"{"id":"cs_2","payment_status":"unpaid"}"#).unwrap();
        assert!(!session.is_donation());
        assert!(!session.is_paid());
    }
}
