// src/test_utils/mock_chat_server.rs
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Scripted reply for one chat-completions exchange.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with a standard envelope whose message content is this string.
    Content(String),
    /// Bare HTTP status, no body.
    Status(u16),
    /// 200 with this raw JSON body, for malformed-envelope cases.
    Envelope(Value),
}

#[derive(Clone)]
struct MockServerState {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockServerState {
    fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

async fn chat_completions_handler(
    axum::extract::State(state): axum::extract::State<MockServerState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, axum::http::StatusCode> {
    log::debug!("Mock chat server received request for model {:?}", payload["model"]);
    state.requests.lock().unwrap().push(payload);

    match state.replies.lock().unwrap().pop_front() {
        Some(MockReply::Content(content)) => Ok(Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": content } }]
        }))),
        Some(MockReply::Envelope(body)) => Ok(Json(body)),
        Some(MockReply::Status(code)) => Err(axum::http::StatusCode::from_u16(code)
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR)),
        None => {
            log::error!("Mock chat server ran out of scripted replies");
            Err(axum::http::StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

pub struct MockChatServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockChatServer {
    pub async fn start(replies: Vec<MockReply>) -> Self {
        let state = MockServerState::new(replies);
        let requests = state.requests.clone();

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock chat server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("Mock chat server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| {
                    log::error!("Mock chat server error: {}", e);
                });
        });

        MockChatServer {
            addr,
            shutdown_tx,
            requests,
        }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request bodies received so far, in arrival order.
    pub fn recorded_requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("Mock chat server shutdown signal already sent or receiver dropped.");
        }
    }
}
