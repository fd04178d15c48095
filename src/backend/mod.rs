//! Demo person service standing in for the Keycloak-protected backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The action panel targets `{base_url}/person`. This module serves that
//! resource with role checks shaped like the real deployment: create needs
//! `person-admin`, update needs `person-user`, and the PATCH route needs a
//! role the demo users do not hold, so it answers 403.
//!
//! Tokens are opaque strings mapped to role sets from [`BackendConfig`];
//! there is no signature validation here.

pub mod routes;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Router;
use axum::routing::{get, post};
use rand::Rng;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{BackendConfig, TokenGrant};

pub const ROLE_ADMIN: &str = "person-admin";
pub const ROLE_USER: &str = "person-user";
pub const ROLE_SUPERUSER: &str = "person-superuser";

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("listener failed: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// STATE
// =============================================================================

/// Shared service state, injected into handlers via the `State` extractor.
#[derive(Clone, Debug, Default)]
pub struct BackendState {
    grants: Arc<HashMap<String, HashSet<String>>>,
    requests: Arc<AtomicU64>,
}

impl BackendState {
    pub fn new(grants: &[TokenGrant]) -> Self {
        let grants = grants
            .iter()
            .map(|g| (g.token.clone(), g.roles.iter().cloned().collect()))
            .collect();
        Self { grants: Arc::new(grants), requests: Arc::new(AtomicU64::new(0)) }
    }

    pub fn roles_for(&self, token: &str) -> Option<&HashSet<String>> {
        self.grants.get(token)
    }

    pub(crate) fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Requests that reached `/person`, authorized or not.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

// =============================================================================
// DEMO TOKENS
// =============================================================================

/// Bearer token for a generated demo user: 32 random bytes, hex encoded.
/// `serve` logs it at startup so a client can pass it with `--token`.
#[must_use]
pub fn demo_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut hex, b| {
        let _ = write!(hex, "{b:02x}");
        hex
    })
}

/// One admin (create + update) and one plain user (update only).
pub fn demo_grants() -> Vec<TokenGrant> {
    vec![
        TokenGrant { token: demo_token(), roles: vec![ROLE_ADMIN.to_owned(), ROLE_USER.to_owned()] },
        TokenGrant { token: demo_token(), roles: vec![ROLE_USER.to_owned()] },
    ]
}

// =============================================================================
// ROUTER
// =============================================================================

pub fn app(state: BackendState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .route(
            "/person",
            post(routes::create_person)
                .put(routes::update_person)
                .patch(routes::patch_person),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the listener fails.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server stops.
pub async fn serve(config: BackendConfig) -> Result<(), BackendError> {
    let grants = if config.grants.is_empty() {
        let generated = demo_grants();
        for grant in &generated {
            info!(token = %grant.token, roles = ?grant.roles, "generated demo token");
        }
        generated
    } else {
        config.grants
    };

    let state = BackendState::new(&grants);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    info!(port = config.port, tokens = grants.len(), "person service listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
