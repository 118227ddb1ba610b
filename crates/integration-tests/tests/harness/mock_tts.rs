//! Mock Cloud Text-to-Speech backend for integration tests

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use base64::Engine as _;
use tokio_util::sync::CancellationToken;

/// Bytes the mock returns as synthesized audio
pub const MOCK_AUDIO: &[u8] = b"ID3 mock mp3 payload";

/// Mock speech synthesis backend
pub struct MockTts {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockTtsState>,
}

struct MockTtsState {
    request_count: AtomicU32,
    fail_status: Option<u16>,
}

impl MockTts {
    /// Start a mock that returns canned audio
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Start a mock that fails every request with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(Some(status)).await
    }

    async fn start_inner(fail_status: Option<u16>) -> anyhow::Result<Self> {
        let state = Arc::new(MockTtsState {
            request_count: AtomicU32::new(0),
            fail_status,
        });

        let app = Router::new()
            .route("/text:synthesize", routing::post(synthesize))
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

    /// Base URL to point the speech config at
    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}/", self.addr)).expect("valid mock URL")
    }

    /// Number of synthesize requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }
}

impl Drop for MockTts {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn synthesize(State(state): State<Arc<MockTtsState>>) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = state.fail_status {
        return (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(serde_json::json!({"error": {"message": "mock failure"}})),
        )
            .into_response();
    }

    Json(serde_json::json!({
        "audioContent": base64::engine::general_purpose::STANDARD.encode(MOCK_AUDIO)
    }))
    .into_response()
}
