use tokio::sync::watch;
use tracing::{debug, instrument};

use super::{
    FlowError, FlowState, FormState, Navigation, PASSWORD_LOGIN_FAILED, Services, SubmitOutcome,
};
use crate::forms::LoginForm;

/// Drives the login page: password submit and the federated button.
pub struct LoginController {
    services: Services,
    flow: FlowState,
}

impl LoginController {
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self {
            services,
            flow: FlowState::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> FormState {
        self.flow.current()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.flow.subscribe()
    }

    /// Password login. On success the current route is refreshed so the server
    /// picks up the new session cookie.
    #[instrument(skip_all)]
    pub async fn submit(&self, form: LoginForm) -> SubmitOutcome {
        let Some(attempt) = self.flow.begin() else {
            debug!("login submit ignored while another attempt is in flight");
            return SubmitOutcome::Busy;
        };

        attempt.enter(FormState::Validating);
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => {
                debug!(fields = errors.len(), "login form rejected");
                return SubmitOutcome::Invalid(errors);
            }
        };

        attempt.enter(FormState::Authenticating);
        let result: Result<Navigation, FlowError> = async {
            let session = self
                .services
                .identity
                .sign_in_with_password(credentials.email(), credentials.password())
                .await?;
            self.services.establish_session(&attempt, session).await?;
            self.services.navigate(&attempt, Navigation::Refresh).await
        }
        .await;
        drop(credentials);

        self.services
            .finish(&attempt, result, PASSWORD_LOGIN_FAILED)
    }

    /// "Login with Google".
    #[instrument(skip_all)]
    pub async fn federated_login(&self) -> SubmitOutcome {
        let Some(attempt) = self.flow.begin() else {
            debug!("federated login ignored while another attempt is in flight");
            return SubmitOutcome::Busy;
        };
        self.services.federated_login(&attempt).await
    }
}
