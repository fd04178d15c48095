//! Person routes and the bearer-token extractor guarding them.

use std::collections::HashSet;

use axum::Json;
use axum::extract::FromRef;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::{BackendState, ROLE_ADMIN, ROLE_SUPERUSER, ROLE_USER};

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Caller identified by a known bearer token.
/// Use as a handler parameter to require authentication.
#[derive(Debug)]
pub struct Caller {
    pub roles: HashSet<String>,
}

impl Caller {
    fn require(&self, role: &str) -> Result<(), StatusCode> {
        if self.roles.contains(role) {
            Ok(())
        } else {
            warn!(role, "caller lacks required role");
            Err(StatusCode::FORBIDDEN)
        }
    }
}

impl<S> axum::extract::FromRequestParts<S> for Caller
where
    BackendState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = BackendState::from_ref(state);
        state.record_request();

        let token = bearer_token(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)?;
        let roles = state.roles_for(token).cloned().ok_or_else(|| {
            warn!("unknown bearer token");
            StatusCode::UNAUTHORIZED
        })?;

        Ok(Self { roles })
    }
}

/// Token from `Authorization: Bearer <token>`; the scheme is case-insensitive.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PersonResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub message: &'static str,
}

/// `POST /person`: requires `person-admin`.
pub async fn create_person(caller: Caller) -> Result<(StatusCode, Json<PersonResponse>), StatusCode> {
    caller.require(ROLE_ADMIN)?;
    let id = Uuid::new_v4();
    info!(%id, "person created");
    Ok((StatusCode::CREATED, Json(PersonResponse { id: Some(id), message: "person created" })))
}

/// `PUT /person`: requires `person-user`.
pub async fn update_person(caller: Caller) -> Result<Json<PersonResponse>, StatusCode> {
    caller.require(ROLE_USER)?;
    info!("person updated");
    Ok(Json(PersonResponse { id: None, message: "person updated" }))
}

/// `PATCH /person`: requires `person-superuser`, which demo users lack.
pub async fn patch_person(caller: Caller) -> Result<Json<PersonResponse>, StatusCode> {
    caller.require(ROLE_SUPERUSER)?;
    info!("person patched");
    Ok(Json(PersonResponse { id: None, message: "person patched" }))
}

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
