//! Cookie exchange: trade an identity assertion for a session cookie.
//!
//! One `GET /api/login` carrying the assertion as a bearer credential. The
//! endpoint answers with `Set-Cookie`; the cookie lands in the shared client's
//! cookie store, which plays the part of the browser. The call is made once and
//! never retried.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    http::{build_url, sanitize_body},
    identity::IdentityAssertion,
};

/// Path of the cookie exchange endpoint.
pub const LOGIN_PATH: &str = "/api/login";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("cookie exchange rejected with status {0}")]
    Status(u16),
    #[error("cookie exchange failed: {0}")]
    Network(String),
}

#[async_trait]
pub trait CookieExchange: Send + Sync {
    /// Hand the assertion to the session endpoint so it can set the cookie.
    async fn exchange(&self, assertion: &IdentityAssertion) -> Result<(), ExchangeError>;
}

/// `CookieExchange` against a running session endpoint.
#[derive(Clone, Debug)]
pub struct HttpCookieExchange {
    http: Client,
    base_url: String,
}

impl HttpCookieExchange {
    /// `http` should be the client whose cookie store later requests reuse.
    #[must_use]
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CookieExchange for HttpCookieExchange {
    #[instrument(skip_all)]
    async fn exchange(&self, assertion: &IdentityAssertion) -> Result<(), ExchangeError> {
        let url = build_url(&self.base_url, LOGIN_PATH);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, assertion.bearer())
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ExchangeError::Network("request timed out".to_string())
                } else {
                    ExchangeError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "session cookie issued");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            warn!("session endpoint rejected identity assertion");
        } else {
            warn!(
                status = status.as_u16(),
                body = %sanitize_body(&body),
                "session endpoint returned an error"
            );
        }
        Err(ExchangeError::Status(status.as_u16()))
    }
}
