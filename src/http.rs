//! Shared HTTP client setup for outbound calls.
//!
//! The identity client and the cookie exchange share one policy: a fixed user
//! agent, a request timeout so a stalled call cannot wedge a submit, and a
//! cookie store standing in for the browser's cookie jar.

use reqwest::Client;
use std::time::Duration;

use crate::APP_USER_AGENT;

/// Default request timeout applied to every outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters kept for diagnostics.
const MAX_ERROR_CHARS: usize = 200;

/// Build the shared client with the default timeout and a cookie store.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialized.
pub fn client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(DEFAULT_TIMEOUT)
        .cookie_store(true)
        .build()
}

/// Join a base URL and a path without doubling or dropping the slash.
#[must_use]
pub fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Trim and truncate an error body before it is logged.
#[must_use]
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
