//! # Firegate
//!
//! Email/password and federated (Google) login plus account registration on
//! top of a hosted identity provider, with the resulting session carried in a
//! server-issued `HttpOnly` cookie.
//!
//! ## Flow
//!
//! 1. A form is validated locally (`forms`). Invalid input never leaves the
//!    process.
//! 2. The identity provider authenticates the user and yields an ID token
//!    (`identity`).
//! 3. The ID token is exchanged for a signed session cookie at
//!    `GET /api/login` (`exchange` on the client, `server` on the other side).
//! 4. The controller navigates: login refreshes the current route, register
//!    sends the user to `/login` (`controller`).
//!
//! Steps run strictly in order and are never retried. Any failure ends the
//! attempt with one generic notification.

pub mod cli;
pub mod controller;
pub mod exchange;
pub mod forms;
pub mod http;
pub mod identity;
pub mod server;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
