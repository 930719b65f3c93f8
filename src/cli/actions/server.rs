use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

use crate::{
    http,
    identity::{FirebaseAuth, FirebaseConfig},
    server::{self, AppState, CookieConfig},
};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub app_url: Option<String>,
    pub cookie: CookieConfig,
    pub firebase: FirebaseConfig,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!(
        cookie = %args.cookie.name,
        secure = args.cookie.secure,
        max_age = args.cookie.max_age,
        rotation = args.cookie.previous_key.is_some(),
        "session cookie settings"
    );

    let client = http::client().context("Failed to build HTTP client")?;
    let verifier = Arc::new(FirebaseAuth::new(args.firebase, client));
    let state = Arc::new(AppState::new(args.cookie, verifier));

    server::new(args.port, state, args.app_url).await
}
