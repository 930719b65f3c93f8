pub mod health;
pub use self::health::health;

pub mod login;
pub use self::login::login;

pub mod logout;
pub use self::logout::logout;

pub mod session;
pub use self::session::session;

// common functions for the handlers
use axum::http::{HeaderMap, header::AUTHORIZATION};

/// Token from an `Authorization: Bearer <token>` header.
pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
