//! Shared fixtures for unit tests: a recording HTTP endpoint, a recording
//! notifier, and a token provider that always fails.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::any;

use crate::auth::{BearerToken, TokenError, TokenProvider};
use crate::components::action_panel::{Notifier, Outcome};
use crate::config::ClientConfig;

// =============================================================================
// RECORDING SERVER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    pub method: Method,
    pub authorization: Option<String>,
}

#[derive(Clone)]
struct FixtureState {
    status: StatusCode,
    reply_after: Duration,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// `/person` endpoint on an ephemeral port that answers every request with a
/// fixed status and records what it saw.
pub struct RecordingServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingServer {
    pub async fn start(status: StatusCode) -> Self {
        Self::start_slow(status, Duration::ZERO).await
    }

    /// Like [`RecordingServer::start`], but each request is recorded on
    /// arrival and answered only after `reply_after`.
    pub async fn start_slow(status: StatusCode, reply_after: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FixtureState { status, reply_after, requests: requests.clone() };
        let app = Router::new().route("/person", any(record)).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("fixture should bind");
        let addr = listener.local_addr().expect("fixture should have an address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { base_url: format!("http://{addr}"), requests }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("fixture mutex should lock").clone()
    }

    /// Client config pointing at this server with no pre-request delay.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.as_str()).with_action_delay(Duration::ZERO)
    }
}

async fn record(State(state): State<FixtureState>, method: Method, headers: HeaderMap) -> StatusCode {
    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    state
        .requests
        .lock()
        .expect("fixture mutex should lock")
        .push(Recorded { method, authorization });
    if !state.reply_after.is_zero() {
        tokio::time::sleep(state.reply_after).await;
    }
    state.status
}

/// Base URL of a port nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("throwaway listener should bind");
    let addr = listener.local_addr().expect("throwaway listener should have an address");
    drop(listener);
    format!("http://{addr}")
}

// =============================================================================
// NOTIFIER / TOKEN MOCKS
// =============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    outcomes: Mutex<Vec<Outcome>>,
}

impl RecordingNotifier {
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.outcomes.lock().expect("notifier mutex should lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, outcome: Outcome) {
        self.outcomes.lock().expect("notifier mutex should lock").push(outcome);
    }
}

pub struct FailingTokenProvider;

#[async_trait::async_trait]
impl TokenProvider for FailingTokenProvider {
    async fn token(&self) -> Result<BearerToken, TokenError> {
        Err(TokenError::Unavailable("login required".into()))
    }
}

// =============================================================================
// DEMO SERVICE
// =============================================================================

/// Serve the demo person service on an ephemeral port. Returns its base URL
/// and a handle on its state.
pub async fn spawn_backend(grants: &[crate::config::TokenGrant]) -> (String, crate::backend::BackendState) {
    let state = crate::backend::BackendState::new(grants);
    let app = crate::backend::app(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("backend should bind");
    let addr = listener.local_addr().expect("backend should have an address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}"), state)
}
