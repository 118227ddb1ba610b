//! Mock Generative Language backend for integration tests
//!
//! Implements a minimal `generateContent` endpoint that returns canned
//! free-text responses.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock generative backend that returns predictable responses
pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

struct MockGeminiState {
    request_count: AtomicU32,
    /// Raw text returned inside the first candidate
    response_text: String,
    /// Status to fail with instead of responding (None = succeed)
    fail_status: Option<u16>,
}

/// Canned reply with an embedded JSON object, as a well-behaved model
/// would produce
pub const WELL_FORMED_REPLY: &str = concat!(
    "Here is a suggestion for you!\n",
    r#"{"message": "Wonderful to hear you're doing well!", "activities": ["Go for a walk", "Call a friend", "Start a journal"]}"#,
    "\nHope that helps."
);

impl MockGemini {
    /// Start a mock that returns a well-formed reply
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(WELL_FORMED_REPLY.to_owned(), None).await
    }

    /// Start a mock that returns the given text
    pub async fn start_with_text(text: &str) -> anyhow::Result<Self> {
        Self::start_inner(text.to_owned(), None).await
    }

    /// Start a mock that fails every request with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(String::new(), Some(status)).await
    }

    async fn start_inner(response_text: String, fail_status: Option<u16>) -> anyhow::Result<Self> {
        let state = Arc::new(MockGeminiState {
            request_count: AtomicU32::new(0),
            response_text,
            fail_status,
        });

        let app = Router::new()
            .route("/models/{model_action}", routing::post(generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL to point the generation config at
    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}/", self.addr)).expect("valid mock URL")
    }

    /// Number of generate requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn generate(State(state): State<Arc<MockGeminiState>>) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = state.fail_status {
        return (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(serde_json::json!({"error": {"message": "mock failure"}})),
        )
            .into_response();
    }

    Json(serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": state.response_text}]
            }
        }]
    }))
    .into_response()
}
