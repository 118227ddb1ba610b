//! Health endpoint tests

mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;

#[tokio::test]
async fn health_returns_ok() {
    let config = ConfigBuilder::new().build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn unconfigured_capabilities_are_not_mounted() {
    // No backends configured, so the chat route must not exist
    let config = ConfigBuilder::new().build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/api/chat"))
        .json(&serde_json::json!({"mood": "happy"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}
