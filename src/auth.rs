//! Authentication state and bearer-token sources.
//!
//! DESIGN
//! ======
//! Components receive auth capabilities explicitly instead of looking them
//! up ambiently: an [`AuthContext`] answers "is someone logged in", and a
//! [`TokenProvider`] yields the bearer token for outgoing requests. The
//! login flow and token refresh belong to the provider, not to this crate.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while obtaining a bearer token.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token source could not produce a token.
    #[error("token source unavailable: {0}")]
    Unavailable(String),

    /// The token source produced an empty token.
    #[error("token is empty")]
    Empty,
}

// =============================================================================
// AUTH CONTEXT
// =============================================================================

/// Authentication flag supplied by the auth provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
}

/// Read-only view of the authentication state.
pub trait AuthContext: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

impl AuthContext for AuthState {
    fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }
}

/// Shared auth state. The provider flips the flag; components only read it.
#[derive(Clone, Debug, Default)]
pub struct AuthHandle {
    inner: Arc<RwLock<AuthState>>,
}

impl AuthHandle {
    #[must_use]
    pub fn new(state: AuthState) -> Self {
        Self { inner: Arc::new(RwLock::new(state)) }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> AuthState {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_authenticated(&self, value: bool) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated = value;
        tracing::debug!(authenticated = value, "auth state changed");
    }
}

impl AuthContext for AuthHandle {
    fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated
    }
}

// =============================================================================
// BEARER TOKEN
// =============================================================================

/// Opaque bearer credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Empty`] if nothing remains after trimming.
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

// =============================================================================
// TOKEN PROVIDERS
// =============================================================================

/// Asynchronous source of the current bearer token (e.g. a Keycloak client).
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<BearerToken, TokenError>;
}

/// Provider that always yields the same token.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: BearerToken,
}

impl StaticTokenProvider {
    #[must_use]
    pub fn new(token: BearerToken) -> Self {
        Self { token }
    }
}

#[async_trait::async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<BearerToken, TokenError> {
        Ok(self.token.clone())
    }
}

/// Provider that reads the token from an environment variable on every call,
/// so an external process can rotate it.
#[derive(Clone, Debug)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait::async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn token(&self) -> Result<BearerToken, TokenError> {
        let raw = std::env::var(&self.var)
            .map_err(|_| TokenError::Unavailable(format!("env var {} not set", self.var)))?;
        BearerToken::new(raw)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
