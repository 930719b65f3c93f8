//! `Navigator` for terminal front ends.
//!
//! There is no browser to reload, so a refresh re-reads the session endpoint
//! with the shared cookie store. That confirms the server now recognizes the
//! cookie the exchange just set.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Mutex;
use tracing::{info, instrument};

use super::{NavigationError, Navigator};
use crate::{http::build_url, identity::VerifiedUser};

pub const SESSION_PATH: &str = "/api/session";

#[derive(Debug)]
pub struct HttpNavigator {
    http: Client,
    base_url: String,
    route: Mutex<String>,
    user: Mutex<Option<VerifiedUser>>,
}

impl HttpNavigator {
    /// `http` must share its cookie store with the cookie exchange.
    #[must_use]
    pub fn new(http: Client, base_url: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            route: Mutex::new(route.into()),
            user: Mutex::new(None),
        }
    }

    /// Route the last navigation landed on.
    #[must_use]
    pub fn route(&self) -> String {
        self.route
            .lock()
            .map(|route| route.clone())
            .unwrap_or_default()
    }

    /// Session seen by the last refresh, if any.
    #[must_use]
    pub fn user(&self) -> Option<VerifiedUser> {
        self.user.lock().ok().and_then(|user| user.clone())
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    #[instrument(skip_all)]
    async fn refresh(&self) -> Result<(), NavigationError> {
        let url = build_url(&self.base_url, SESSION_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| NavigationError(err.without_url().to_string()))?;

        let user = match response.status() {
            StatusCode::OK => Some(
                response
                    .json::<VerifiedUser>()
                    .await
                    .map_err(|err| NavigationError(err.without_url().to_string()))?,
            ),
            StatusCode::NO_CONTENT => None,
            status => {
                return Err(NavigationError(format!(
                    "session endpoint returned {}",
                    status.as_u16()
                )));
            }
        };

        match &user {
            Some(user) => info!(uid = %user.uid, route = %self.route(), "refreshed with session"),
            None => info!(route = %self.route(), "refreshed without session"),
        }
        if let Ok(mut current) = self.user.lock() {
            *current = user;
        }
        Ok(())
    }

    async fn push(&self, path: &str) -> Result<(), NavigationError> {
        info!(path, "navigating");
        if let Ok(mut route) = self.route.lock() {
            *route = path.to_string();
        }
        Ok(())
    }
}
