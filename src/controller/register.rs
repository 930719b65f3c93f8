use tokio::sync::watch;
use tracing::{debug, instrument};

use super::{
    FlowError, FlowState, FormState, LOGIN_ROUTE, Navigation, REGISTER_FAILED, Services,
    SubmitOutcome,
};
use crate::forms::RegisterForm;

/// Drives the register page.
///
/// A successful registration sets the display name and sends the user to the
/// login page. It does not establish a session cookie; the user signs in
/// afterwards. The federated button behaves exactly as on the login page.
pub struct RegisterController {
    services: Services,
    flow: FlowState,
}

impl RegisterController {
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

    #[instrument(skip_all)]
    pub async fn submit(&self, form: RegisterForm) -> SubmitOutcome {
        let Some(attempt) = self.flow.begin() else {
            debug!("register submit ignored while another attempt is in flight");
            return SubmitOutcome::Busy;
        };

        attempt.enter(FormState::Validating);
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => {
                debug!(fields = errors.len(), "register form rejected");
                return SubmitOutcome::Invalid(errors);
            }
        };

        attempt.enter(FormState::Authenticating);
        let result: Result<Navigation, FlowError> = async {
            let session = self
                .services
                .identity
                .create_account(credentials.email(), credentials.password())
                .await?;
            session
                .update_profile(&credentials.display_name())
                .await?;
            self.services
                .navigate(&attempt, Navigation::Push(LOGIN_ROUTE.to_string()))
                .await
        }
        .await;
        drop(credentials);

        self.services.finish(&attempt, result, REGISTER_FAILED)
    }

    /// "Login with Google" from the register page.
    #[instrument(skip_all)]
    pub async fn federated_login(&self) -> SubmitOutcome {
        let Some(attempt) = self.flow.begin() else {
            debug!("federated login ignored while another attempt is in flight");
            return SubmitOutcome::Busy;
        };
        self.services.federated_login(&attempt).await
    }
}
