//! Mock LLM backend server for integration tests
//!
//! Implements `/v1/chat/completions` in OpenRouter's shape and records what
//! it receives so tests can assert on the outbound call.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Valid key accepted by [`MockLlm::start_with_auth`]
pub const VALID_KEY: &str = "sk-valid";

/// Message returned for a rejected key, matching OpenRouter's wording
pub const AUTH_FAILURE: &str = "No auth credentials found";

/// One call received by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub body: serde_json::Value,
    pub authorization: Option<String>,
}

/// Mock LLM backend that returns predictable responses
pub struct MockLlm {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockLlmState>,
}

#[derive(Default)]
struct Behavior {
    /// Answer every call with this status and OpenRouter-style error body
    failure: Option<(StatusCode, String)>,
    /// Reject any bearer token other than [`VALID_KEY`]
    require_key: bool,
    /// Sleep before answering
    delay: Option<Duration>,
    /// Custom response content (if set)
    response_content: Option<String>,
}

struct MockLlmState {
    completion_count: AtomicU32,
    calls: Mutex<Vec<RecordedCall>>,
    behavior: Behavior,
}

impl MockLlm {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Behavior::default()).await
    }

    /// Start a mock server with a custom response content
    pub async fn start_with_response(content: &str) -> anyhow::Result<Self> {
        Self::start_inner(Behavior {
            response_content: Some(content.to_owned()),
            ..Behavior::default()
        })
        .await
    }

    /// Start a mock server that answers 401 unless the key is [`VALID_KEY`]
    pub async fn start_with_auth() -> anyhow::Result<Self> {
        Self::start_inner(Behavior {
            require_key: true,
            ..Behavior::default()
        })
        .await
    }

    /// Start a mock server that fails every call with `status`
    pub async fn start_failing(status: StatusCode, message: &str) -> anyhow::Result<Self> {
        Self::start_inner(Behavior {
            failure: Some((status, message.to_owned())),
            ..Behavior::default()
        })
        .await
    }

    /// Start a mock server that waits `delay` before answering
    pub async fn start_slow(delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(Behavior {
            delay: Some(delay),
            ..Behavior::default()
        })
        .await
    }

    async fn start_inner(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            completion_count: AtomicU32::new(0),
            calls: Mutex::new(Vec::new()),
            behavior,
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
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

    /// Base URL for configuring the mock as a provider
    ///
    /// Includes `/v1` since the provider appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    /// The most recent call
    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("mock received no calls")
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": {"message": message, "code": status.as_u16()}
        })),
    )
        .into_response()
}

async fn handle_chat_completions(
    State(state): State<Arc<MockLlmState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);

    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    state.calls.lock().unwrap().push(RecordedCall {
        body: body.clone(),
        authorization: authorization.clone(),
    });

    let behavior = &state.behavior;

    if let Some(delay) = behavior.delay {
        tokio::time::sleep(delay).await;
    }

    if let Some((status, message)) = &behavior.failure {
        return error_body(*status, message);
    }

    let expected = format!("Bearer {VALID_KEY}");
    if behavior.require_key && authorization.as_deref() != Some(expected.as_str()) {
        return error_body(StatusCode::UNAUTHORIZED, AUTH_FAILURE);
    }

    let content = behavior.response_content.as_deref().unwrap_or("Hello from mock LLM");

    Json(serde_json::json!({
        "id": "gen-test-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }))
    .into_response()
}
