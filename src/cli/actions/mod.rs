pub mod login;
pub mod register;
pub mod server;

// Internal "interpreter" for `Action`.
mod run;

use anyhow::{Context, Result, anyhow};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::info;

use crate::{
    controller::{
        FAILURE_TITLE, HttpNavigator, LogNotifier, Navigation, Services, SubmitOutcome,
    },
    exchange::HttpCookieExchange,
    http,
    identity::{FederatedCredential, FirebaseAuth, FirebaseConfig, ProvidedCredential},
};

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
    Login(login::Args),
    Register(register::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Real collaborators for a terminal login or register run.
///
/// Identity calls, the cookie exchange and the session refresh share one
/// client, so the cookie set by the exchange is sent on the refresh.
struct Flow {
    services: Services,
    navigator: Arc<HttpNavigator>,
}

impl Flow {
    fn new(
        app_url: &str,
        firebase: FirebaseConfig,
        google_id_token: Option<SecretString>,
        route: &str,
    ) -> Result<Self> {
        let client = http::client().context("Failed to build HTTP client")?;

        let popup = ProvidedCredential::new(
            google_id_token
                .map(|token| FederatedCredential::google_id_token(token.expose_secret())),
        );
        let identity = FirebaseAuth::new(firebase, client.clone()).with_popup(Arc::new(popup));
        let navigator = Arc::new(HttpNavigator::new(client.clone(), app_url, route));

        Ok(Self {
            services: Services {
                identity: Arc::new(identity),
                exchange: Arc::new(HttpCookieExchange::new(client, app_url)),
                navigator: navigator.clone(),
                notifier: Arc::new(LogNotifier),
            },
            navigator,
        })
    }

    fn report(&self) {
        match self.navigator.user() {
            Some(user) => info!(
                uid = %user.uid,
                email = user.email.as_deref().unwrap_or_default(),
                route = %self.navigator.route(),
                "signed in"
            ),
            None => info!(route = %self.navigator.route(), "no active session"),
        }
    }
}

/// Turn a controller outcome into the process result.
fn conclude(outcome: SubmitOutcome) -> Result<Navigation> {
    match outcome {
        SubmitOutcome::Completed(navigation) => {
            info!(?navigation, "done");
            Ok(navigation)
        }
        SubmitOutcome::Invalid(errors) => Err(anyhow!("invalid input: {errors}")),
        // The notifier already showed the generic message; keep the cause for the exit status.
        SubmitOutcome::Failed(err) => Err(anyhow!(err).context(FAILURE_TITLE)),
        SubmitOutcome::Busy => Err(anyhow!("another attempt is already running")),
    }
}
