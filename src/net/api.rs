//! REST helper for the person resource.
//!
//! ERROR HANDLING
//! ==============
//! [`PersonApi::send`] reports transport errors and HTTP statuses as-is;
//! collapsing them into a user-facing outcome is the caller's job.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};

use crate::auth::BearerToken;
use crate::config::ClientConfig;

/// Errors produced while setting up the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(#[from] reqwest::Error),
}

/// Cheap-to-clone handle for `{base_url}/person`.
#[derive(Clone, Debug)]
pub struct PersonApi {
    http: reqwest::Client,
    url: String,
}

impl PersonApi {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { http: builder.build()?, url: config.person_url() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one bodiless request with `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns the transport error if no response was received.
    pub async fn send(&self, method: Method, token: &BearerToken) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .http
            .request(method, &self.url)
            .header(AUTHORIZATION, token.authorization_value())
            .send()
            .await?;
        Ok(response.status())
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
