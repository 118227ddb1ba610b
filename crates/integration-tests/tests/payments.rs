//! End-to-end payment and webhook endpoint tests

mod harness;

use harness::config::ConfigBuilder;
use harness::mock_stripe::MockStripe;
use harness::server::TestServer;
use secrecy::SecretString;
use solace_payments::webhook::sign_payload;

#[tokio::test]
async fn checkout_session_returns_redirect_url() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/create-checkout-session"))
        .json(&serde_json::json!({"amount": 10}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["url"].as_str().unwrap().starts_with("https://checkout.stripe.test/"));
}

#[tokio::test]
async fn checkout_session_rejects_bad_amounts() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    for body in [
        serde_json::json!({"amount": -5}),
        serde_json::json!({"amount": 0}),
        serde_json::json!({"amount": "10"}),
        serde_json::json!({}),
    ] {
        let resp = server
            .client()
            .post(server.url("/api/create-checkout-session"))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400, "accepted {body}");

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["error"], "Invalid amount. Must be a positive number.");
    }
}

#[tokio::test]
async fn donate_tags_session_as_donation() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/donate"))
        .json(&serde_json::json!({"amount": 12.5, "currency": "EUR"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    let session_id = json["sessionId"].as_str().unwrap();
    assert!(json["url"].is_string());

    // The mock recorded the metadata the server sent
    let session = mock.session(session_id).unwrap();
    assert_eq!(session["metadata"]["type"], "donation");
    assert_eq!(session["metadata"]["amount"], "12.5");
    assert_eq!(session["metadata"]["currency"], "EUR");
}

#[tokio::test]
async fn verify_donation_requires_session_id() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/verify-donation"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Session ID is required");
}

#[tokio::test]
async fn verify_donation_unknown_session_is_not_found() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/verify-donation"))
        .json(&serde_json::json!({"sessionId": "cs_test_missing"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Session not found");
}

#[tokio::test]
async fn verify_donation_rejects_path_breaking_session_id() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    for session_id in ["cs_test/../../v1/charges", "cs_test?expand[]=customer", "cs#f"] {
        let resp = server
            .client()
            .post(server.url("/api/verify-donation"))
            .json(&serde_json::json!({"sessionId": session_id}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 404, "accepted {session_id}");
    }
}

#[tokio::test]
async fn verify_donation_rejects_unpaid_session() {
    let mock = MockStripe::start().await.unwrap();
    mock.insert_session(serde_json::json!({
        "id": "cs_test_unpaid",
        "payment_status": "unpaid",
        "metadata": {"type": "donation", "amount": "10", "currency": "USD"},
    }));
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/verify-donation"))
        .json(&serde_json::json!({"sessionId": "cs_test_unpaid"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Payment not completed");
}

#[tokio::test]
async fn verify_donation_rejects_non_donation_session() {
    let mock = MockStripe::start().await.unwrap();
    mock.insert_session(serde_json::json!({
        "id": "cs_test_support",
        "payment_status": "paid",
        "metadata": {"source": "Support Solace Companion"},
    }));
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/verify-donation"))
        .json(&serde_json::json!({"sessionId": "cs_test_support"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Invalid session type");
}

#[tokio::test]
async fn verify_donation_returns_session_details() {
    let mock = MockStripe::start().await.unwrap();
    mock.insert_session(serde_json::json!({
        "id": "cs_test_paid",
        "payment_status": "paid",
        "customer": "cus_123",
        "customer_details": {"email": "donor@example.com"},
        "metadata": {"type": "donation", "amount": "25", "currency": "USD"},
    }));
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/verify-donation"))
        .json(&serde_json::json!({"sessionId": "cs_test_paid"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["session"]["id"], "cs_test_paid");
    assert_eq!(json["session"]["amount"], "25");
    assert_eq!(json["session"]["currency"], "USD");
    assert_eq!(json["session"]["customer"], "cus_123");
    assert_eq!(json["session"]["email"], "donor@example.com");
}

const DONATION_EVENT: &str = r#"{
  "type": "checkout.session.completed",
  "data": {
    "object": {
      "id": "cs_test_event",
      "payment_status": "paid",
      "metadata": {"type": "donation", "amount": "10", "currency": "USD"}
    }
  }
}"#;

#[tokio::test]
async fn webhook_without_secret_accepts_unsigned_events() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new().with_payments(mock.base_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/webhooks/stripe"))
        .header("content-type", "application/json")
        .body(DONATION_EVENT)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["received"], true);
}

#[tokio::test]
async fn webhook_with_secret_accepts_signed_events() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_payments(mock.base_url())
        .with_webhook_secret("whsec_test")
        .build();
    let server = TestServer::start(config).await.unwrap();

    let secret = SecretString::from("whsec_test");
    let header = sign_payload("1700000000", DONATION_EVENT, &secret);

    let resp = server
        .client()
        .post(server.url("/api/webhooks/stripe"))
        .header("content-type", "application/json")
        .header("stripe-signature", header)
        .body(DONATION_EVENT)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["received"], true);
}

#[tokio::test]
async fn webhook_with_secret_rejects_bad_signature() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_payments(mock.base_url())
        .with_webhook_secret("whsec_test")
        .build();
    let server = TestServer::start(config).await.unwrap();

    let wrong = SecretString::from("whsec_other");
    let header = sign_payload("1700000000", DONATION_EVENT, &wrong);

    let resp = server
        .client()
        .post(server.url("/api/webhooks/stripe"))
        .header("content-type", "application/json")
        .header("stripe-signature", header)
        .body(DONATION_EVENT)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Webhook handler failed");
}

#[tokio::test]
async fn webhook_with_secret_rejects_missing_header() {
    let mock = MockStripe::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_payments(mock.base_url())
        .with_webhook_secret("whsec_test")
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/webhooks/stripe"))
        .header("content-type", "application/json")
        .body(DONATION_EVENT)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}
