//! Recording fakes for controller tests.
#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::{Navigator, NavigationError, Notification, Notifier, Services};
use crate::{
    exchange::{CookieExchange, ExchangeError},
    identity::{AuthError, AuthSession, IdentityAssertion, IdentityProvider},
};

/// Ordered record of every collaborator call.
#[derive(Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub(crate) fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

pub(crate) struct FakeSession {
    log: CallLog,
    token: Result<String, AuthError>,
    update: Result<(), AuthError>,
}

#[async_trait]
impl AuthSession for FakeSession {
    fn uid(&self) -> &str {
        "uid-1"
    }

    fn email(&self) -> Option<&str> {
        Some("user@example.com")
    }

    fn display_name(&self) -> Option<String> {
        None
    }

    async fn id_token(&self) -> Result<IdentityAssertion, AuthError> {
        self.log.push("id_token");
        self.token.clone().map(IdentityAssertion::new)
    }

    async fn update_profile(&self, display_name: &str) -> Result<(), AuthError> {
        self.log.push(format!("update_profile:{display_name}"));
        self.update.clone()
    }
}

pub(crate) struct FakeIdentity {
    pub(crate) log: CallLog,
    pub(crate) sign_in: Result<(), AuthError>,
    pub(crate) federated: Result<(), AuthError>,
    pub(crate) create: Result<(), AuthError>,
    pub(crate) token: Result<String, AuthError>,
    pub(crate) update: Result<(), AuthError>,
    /// When set, password sign-in waits for a permit before answering.
    pub(crate) gate: Option<Arc<Notify>>,
}

impl FakeIdentity {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            sign_in: Ok(()),
            federated: Ok(()),
            create: Ok(()),
            token: Ok("token-1".to_string()),
            update: Ok(()),
            gate: None,
        }
    }

    fn session(&self, outcome: &Result<(), AuthError>) -> Result<Box<dyn AuthSession>, AuthError> {
        outcome.clone()?;
        Ok(Box::new(FakeSession {
            log: self.log.clone(),
            token: self.token.clone(),
            update: self.update.clone(),
        }))
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &SecretString,
    ) -> Result<Box<dyn AuthSession>, AuthError> {
        self.log.push(format!("sign_in:{email}"));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.session(&self.sign_in)
    }

    async fn sign_in_with_federated_popup(&self) -> Result<Box<dyn AuthSession>, AuthError> {
        self.log.push("federated");
        self.session(&self.federated)
    }

    async fn create_account(
        &self,
        email: &str,
        _password: &SecretString,
    ) -> Result<Box<dyn AuthSession>, AuthError> {
        self.log.push(format!("create_account:{email}"));
        self.session(&self.create)
    }
}

pub(crate) struct FakeExchange {
    pub(crate) log: CallLog,
    pub(crate) result: Result<(), ExchangeError>,
}

#[async_trait]
impl CookieExchange for FakeExchange {
    async fn exchange(&self, assertion: &IdentityAssertion) -> Result<(), ExchangeError> {
        self.log.push(format!("exchange:{}", assertion.expose()));
        self.result.clone()
    }
}

pub(crate) struct FakeNavigator {
    pub(crate) log: CallLog,
    pub(crate) result: Result<(), NavigationError>,
}

#[async_trait]
impl Navigator for FakeNavigator {
    async fn refresh(&self) -> Result<(), NavigationError> {
        self.log.push("refresh");
        self.result.clone()
    }

    async fn push(&self, path: &str) -> Result<(), NavigationError> {
        self.log.push(format!("push:{path}"));
        self.result.clone()
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier(Arc<Mutex<Vec<Notification>>>);

impl RecordingNotifier {
    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

/// Knobs for one test scenario; defaults are the happy path.
pub(crate) struct Harness {
    pub(crate) log: CallLog,
    pub(crate) identity: FakeIdentity,
    pub(crate) exchange: Result<(), ExchangeError>,
    pub(crate) navigation: Result<(), NavigationError>,
    pub(crate) notifier: RecordingNotifier,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let log = CallLog::default();
        Self {
            identity: FakeIdentity::new(log.clone()),
            log,
            exchange: Ok(()),
            navigation: Ok(()),
            notifier: RecordingNotifier::default(),
        }
    }

    pub(crate) fn services(self) -> (Services, CallLog, RecordingNotifier) {
        let services = Services {
            identity: Arc::new(self.identity),
            exchange: Arc::new(FakeExchange {
                log: self.log.clone(),
                result: self.exchange,
            }),
            navigator: Arc::new(FakeNavigator {
                log: self.log.clone(),
                result: self.navigation,
            }),
            notifier: Arc::new(self.notifier.clone()),
        };
        (services, self.log, self.notifier)
    }
}
