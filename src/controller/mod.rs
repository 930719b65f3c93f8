//! Form controllers for the login and register pages.
//!
//! A submit walks `Idle -> Validating -> Authenticating -> ExchangingCookie ->
//! Navigating` and settles back to `Idle`. Any failing step moves to `Failed`,
//! shows one generic destructive notification, and ends the attempt. Steps are
//! strictly sequential: the cookie exchange only starts after authentication
//! finished, navigation only after the exchange succeeded.
//!
//! One attempt runs at a time per controller. A submit that arrives while
//! another is in flight is answered with `SubmitOutcome::Busy` and does
//! nothing else.
//!
//! State transitions are published on a `watch` channel so a front end can
//! disable its submit control or show a spinner.

pub mod login;
pub mod navigator;
pub mod register;

#[cfg(test)]
pub(crate) mod test_support;

pub use login::LoginController;
pub use navigator::HttpNavigator;
pub use register::RegisterController;

use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::{
    exchange::{CookieExchange, ExchangeError},
    forms::FieldErrors,
    identity::{AuthError, AuthSession, IdentityProvider},
};

pub const FAILURE_TITLE: &str = "Uh oh! Something went wrong.";
pub const PASSWORD_LOGIN_FAILED: &str = "Please check your email and password and try again.";
pub const FEDERATED_LOGIN_FAILED: &str = "Unable to sign in with Google. Please try again.";
pub const REGISTER_FAILED: &str = "Unable to create your account. Please try again.";

/// Where a successful registration sends the user.
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Authenticating,
    ExchangingCookie,
    Navigating,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Re-read the current route so the server sees the new cookie.
    Refresh,
    Push(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("navigation failed: {0}")]
pub struct NavigationError(pub String);

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation rejected the input; nothing was sent.
    Invalid(FieldErrors),
    Completed(Navigation),
    Failed(FlowError),
    /// Another attempt is still in flight.
    Busy,
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// User-visible toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub variant: NotificationVariant,
    pub title: String,
    pub description: String,
}

impl Notification {
    #[must_use]
    pub fn destructive(description: &str) -> Self {
        Self {
            variant: NotificationVariant::Destructive,
            title: FAILURE_TITLE.to_string(),
            description: description.to_string(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier for terminal front ends: notifications go to the log.
#[derive(Clone, Debug)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Destructive => error!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
            NotificationVariant::Default => info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
        }
    }
}

#[async_trait]
pub trait Navigator: Send + Sync {
    async fn refresh(&self) -> Result<(), NavigationError>;

    async fn push(&self, path: &str) -> Result<(), NavigationError>;
}

/// Collaborators shared by both controllers.
#[derive(Clone)]
pub struct Services {
    pub identity: Arc<dyn IdentityProvider>,
    pub exchange: Arc<dyn CookieExchange>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl Services {
    /// Fetch the session's assertion and trade it for the session cookie.
    async fn establish_session(
        &self,
        attempt: &Attempt<'_>,
        session: Box<dyn AuthSession>,
    ) -> Result<(), FlowError> {
        attempt.enter(FormState::ExchangingCookie);
        let assertion = session.id_token().await?;
        self.exchange.exchange(&assertion).await?;
        Ok(())
    }

    async fn navigate(
        &self,
        attempt: &Attempt<'_>,
        navigation: Navigation,
    ) -> Result<Navigation, FlowError> {
        attempt.enter(FormState::Navigating);
        match &navigation {
            Navigation::Refresh => self.navigator.refresh().await?,
            Navigation::Push(path) => self.navigator.push(path).await?,
        }
        Ok(navigation)
    }

    /// Popup sign-in followed by the cookie exchange and a refresh.
    async fn federated_login(&self, attempt: &Attempt<'_>) -> SubmitOutcome {
        attempt.enter(FormState::Authenticating);
        let result: Result<Navigation, FlowError> = async {
            let session = self.identity.sign_in_with_federated_popup().await?;
            self.establish_session(attempt, session).await?;
            self.navigate(attempt, Navigation::Refresh).await
        }
        .await;

        self.finish(attempt, result, FEDERATED_LOGIN_FAILED)
    }

    fn finish(
        &self,
        attempt: &Attempt<'_>,
        result: Result<Navigation, FlowError>,
        failure_description: &str,
    ) -> SubmitOutcome {
        match result {
            Ok(navigation) => {
                info!(?navigation, "auth flow completed");
                SubmitOutcome::Completed(navigation)
            }
            Err(err) => {
                attempt.enter(FormState::Failed);
                // The cause stays in the log; the user only sees the generic text.
                warn!(error = %err, "auth flow failed");
                self.notifier
                    .notify(Notification::destructive(failure_description));
                SubmitOutcome::Failed(err)
            }
        }
    }
}

/// Per-controller attempt bookkeeping.
struct FlowState {
    state: watch::Sender<FormState>,
    in_flight: AtomicBool,
}

impl FlowState {
    fn new() -> Self {
        let (state, _) = watch::channel(FormState::Idle);
        Self {
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Claim the controller for one attempt, or `None` if one is running.
    fn begin(&self) -> Option<Attempt<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Attempt { flow: self })
    }

    fn current(&self) -> FormState {
        *self.state.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }
}

/// A running attempt. Dropping it returns the controller to `Idle`.
struct Attempt<'a> {
    flow: &'a FlowState,
}

impl Attempt<'_> {
    fn enter(&self, state: FormState) {
        debug!(?state, "form state");
        self.flow.state.send_replace(state);
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        self.flow.state.send_replace(FormState::Idle);
        self.flow.in_flight.store(false, Ordering::Release);
    }
}
