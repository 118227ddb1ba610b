//! Mock Stripe backend for integration tests
//!
//! Supports checkout session creation and retrieval. Sessions created
//! through the mock start out unpaid; tests seed paid sessions directly.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock payment processor
pub struct MockStripe {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockStripeState>,
}

struct MockStripeState {
    session_count: AtomicU32,
    sessions: Mutex<HashMap<String, serde_json::Value>>,
}

impl MockStripe {
    /// Start the mock
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(MockStripeState {
            session_count: AtomicU32::new(0),
            sessions: Mutex::new(HashMap::new()),
        });

        let app = Router::new()
            .route("/v1/checkout/sessions", routing::post(create_session))
            .route("/v1/checkout/sessions/{id}", routing::get(retrieve_session))
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

    /// Base URL to point the payments config at
    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}/", self.addr)).expect("valid mock URL")
    }

    /// Seed a session the mock will return on retrieval
    pub fn insert_session(&self, session: serde_json::Value) {
        let id = session["id"].as_str().expect("session id").to_owned();
        self.state.sessions.lock().expect("mock lock").insert(id, session);
    }

    /// Metadata recorded for a created session, by id
    pub fn session(&self, id: &str) -> Option<serde_json::Value> {
        self.state.sessions.lock().expect("mock lock").get(id).cloned()
    }
}

impl Drop for MockStripe {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn create_session(
    State(state): State<Arc<MockStripeState>>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let n = state.session_count.fetch_add(1, Ordering::SeqCst) + 1;
    let id = format!("cs_test_{n}");

    let mut metadata = serde_json::Map::new();
    for (key, value) in &form {
        if let Some(inner) = key.strip_prefix("metadata[").and_then(|rest| rest.strip_suffix(']')) {
            metadata.insert(inner.to_owned(), serde_json::Value::String(value.clone()));
        }
    }

    let session = serde_json::json!({
        "id": id,
        "url": format!("https://checkout.stripe.test/c/pay/{id}"),
        "payment_status": "unpaid",
        "metadata": metadata,
    });

    state
        .sessions
        .lock()
        .expect("mock lock")
        .insert(id.clone(), session.clone());

    Json(session)
}

async fn retrieve_session(State(state): State<Arc<MockStripeState>>, Path(id): Path<String>) -> impl IntoResponse {
    let sessions = state.sessions.lock().expect("mock lock");

    sessions.get(&id).map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": {"message": "No such checkout.session"}})),
            )
                .into_response()
        },
        |session| Json(session.clone()).into_response(),
    )
}
