//! Webhook event verification and dispatch
//!
//! Inbound events carry a `stripe-signature` header of the form
//! `t=<timestamp>,v1=<hex hmac>`, where the tag is HMAC-SHA256 over
//! `"<timestamp>.<raw body>"` with the endpoint's signing secret. When no
//! signing secret is configured the raw body is parsed directly
//! (development fallback).

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::error::PaymentError;
use crate::types::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

/// Verify a signed event payload and parse it
///
/// # Errors
///
/// Returns [`PaymentError::WebhookVerification`] when the header is missing
/// or malformed, the signature does not match, or the payload is not a
/// valid event
pub fn construct_event(payload: &str, signature_header: &str, secret: &SecretString) -> crate::error::Result<WebhookEvent> {
    let (timestamp, candidates) = parse_signature_header(signature_header)?;

    // verify_slice compares tags in constant time
    let verified = candidates.iter().any(|candidate| {
        decode_hex(candidate).is_some_and(|tag| {
            signed_mac(timestamp, payload, secret).verify_slice(&tag).is_ok()
        })
    });

    if !verified {
        return Err(PaymentError::WebhookVerification("signature mismatch".to_owned()));
    }

    parse_event(payload)
}

/// Parse an unsigned event payload (development fallback)
///
/// # Errors
///
/// Returns [`PaymentError::WebhookVerification`] when the payload is not a
/// valid event
pub fn parse_event(payload: &str) -> crate::error::Result<WebhookEvent> {
    serde_json::from_str(payload).map_err(|e| PaymentError::WebhookVerification(format!("unparsable payload: {e}")))
}

/// Split the signature header into its timestamp and v1 candidates
fn parse_signature_header(header: &str) -> crate::error::Result<(&str, Vec<&str>)> {
    let mut timestamp: Option<&str> = None;
    let mut candidates: Vec<&str> = Vec::new();

    for element in header.split(',') {
        match element.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => candidates.push(value),
            // Unknown schemes (v0, ...) are ignored
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| PaymentError::WebhookVerification("missing timestamp in signature header".to_owned()))?;

    if candidates.is_empty() {
        return Err(PaymentError::WebhookVerification(
            "missing v1 signature in signature header".to_owned(),
        ));
    }

    Ok((timestamp, candidates))
}

/// HMAC-SHA256 state over `"<timestamp>.<payload>"`
fn signed_mac(timestamp: &str, payload: &str, secret: &SecretString) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac
}

/// Decode a lowercase/uppercase hex string; `None` for odd length or
/// non-hex characters
fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }

    hex.as_bytes()
        .chunks(2)
        .map(|pair| {
            let high = char::from(pair[0]).to_digit(16)?;
            let low = char::from(pair[1]).to_digit(16)?;
            u8::try_from((high << 4) | low).ok()
        })
        .collect()
}

/// Build a valid signature header for a payload; test support
pub fn sign_payload(timestamp: &str, payload: &str, secret: &SecretString) -> String {
    let tag = signed_mac(timestamp, payload, secret).finalize().into_bytes();

    let mut hex = String::with_capacity(tag.len() * 2 + 16);
    use std::fmt::Write;
    let _ = write!(hex, "t={timestamp},v1=");
    for byte in tag {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
