//! Typed configuration for the action client and the demo person service.
//!
//! The client side is normally filled from CLI flags (which fall back to
//! `AAS_*` environment variables); the service side reads the environment
//! directly through [`BackendConfig::from_env`].

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9003";
pub const DEFAULT_ACTION_DELAY_MS: u64 = 3000;
pub const DEFAULT_PORT: u16 = 9003;

/// Errors produced while reading configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A value was present but could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root without trailing slash, e.g. `http://localhost:9003`.
    pub base_url: String,
    /// Wait between a trigger and the request going out.
    pub action_delay: Duration,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, action_delay: Duration::from_millis(DEFAULT_ACTION_DELAY_MS), request_timeout: None }
    }

    #[must_use]
    pub fn with_action_delay(mut self, delay: Duration) -> Self {
        self.action_delay = delay;
        self
    }

    /// A zero timeout is treated as "no timeout".
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Full URL of the person resource.
    pub fn person_url(&self) -> String {
        format!("{}/person", self.base_url)
    }
}

// =============================================================================
// DEMO SERVICE
// =============================================================================

/// A bearer token accepted by the demo service and the roles it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub token: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub port: u16,
    /// Accepted tokens. Empty means "generate demo tokens at startup".
    pub grants: Vec<TokenGrant>,
}

impl BackendConfig {
    /// Build from environment variables.
    ///
    /// Optional:
    /// - `AAS_PORT`: listen port, default 9003
    /// - `AAS_DEMO_TOKENS`: `token=role|role,token2=role`
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("AAS_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "AAS_PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let grants = match lookup("AAS_DEMO_TOKENS") {
            Some(raw) => parse_grants(&raw)?,
            None => Vec::new(),
        };
        Ok(Self { port, grants })
    }
}

/// Parse `token=role|role,token2=role`. Blank entries are skipped.
///
/// # Errors
///
/// Returns an error for an entry without `=` or with an empty token.
pub fn parse_grants(raw: &str) -> Result<Vec<TokenGrant>, ConfigError> {
    let mut grants = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = || ConfigError::Invalid { key: "AAS_DEMO_TOKENS", value: entry.to_owned() };
        let (token, roles) = entry.split_once('=').ok_or_else(invalid)?;
        let token = token.trim();
        if token.is_empty() {
            return Err(invalid());
        }
        let roles = roles
            .split('|')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_owned)
            .collect();
        grants.push(TokenGrant { token: token.to_owned(), roles });
    }
    Ok(grants)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
