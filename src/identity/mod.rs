//! Session bootstrap against the hosted identity provider.
//!
//! Controllers only see the `IdentityProvider` and `AuthSession` capabilities,
//! so the real provider can be swapped for a fake in tests. Every operation is
//! attempted exactly once; a failure is handed straight back to the caller.
//!
//! Identity assertions (ID tokens) are bearer credentials. They are wrapped in
//! `SecretString`, never logged, and never persisted by this crate.

pub mod firebase;
pub mod popup;

pub use firebase::{FirebaseAuth, FirebaseConfig, FirebaseSession, VerifiedUser};
pub use popup::{FederatedCredential, FederatedPopup, ProvidedCredential};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("sign-in popup was closed before completing")]
    PopupClosed,
    #[error("email address is already in use")]
    EmailInUse,
    #[error("password is too weak")]
    WeakPassword,
    #[error("user account is disabled")]
    UserDisabled,
    #[error("too many attempts, try again later")]
    TooManyAttempts,
    #[error("identity token is invalid or expired")]
    InvalidToken,
    #[error("network error: {0}")]
    Network(String),
    #[error("identity provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Map an identity provider error code to a typed error.
    ///
    /// Codes may carry a trailing description (`WEAK_PASSWORD : Password should
    /// be at least 6 characters`); only the leading code is matched.
    #[must_use]
    pub fn from_provider_code(message: &str) -> Self {
        let code = message
            .split([' ', ':'])
            .next()
            .unwrap_or_default()
            .trim();
        match code {
            "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" | "INVALID_LOGIN_CREDENTIALS"
            | "INVALID_EMAIL" => Self::InvalidCredentials,
            "EMAIL_EXISTS" => Self::EmailInUse,
            "WEAK_PASSWORD" => Self::WeakPassword,
            "USER_DISABLED" => Self::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_NOT_FOUND" | "INVALID_REFRESH_TOKEN"
            | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => Self::InvalidToken,
            "" => Self::Provider("empty error code".to_string()),
            other => Self::Provider(other.to_string()),
        }
    }
}

/// Short-lived bearer credential proving an authenticated session.
#[derive(Clone)]
pub struct IdentityAssertion(SecretString);

impl IdentityAssertion {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Value for an `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl From<SecretString> for IdentityAssertion {
    fn from(secret: SecretString) -> Self {
        Self(secret)
    }
}

impl fmt::Debug for IdentityAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentityAssertion(***)")
    }
}

/// Authenticated session handle returned by every sign-in operation.
#[async_trait]
pub trait AuthSession: Send + Sync {
    /// Provider user id.
    fn uid(&self) -> &str;

    fn email(&self) -> Option<&str>;

    fn display_name(&self) -> Option<String>;

    /// Current identity assertion. Refreshes first when the cached token is
    /// close to expiry, so this may suspend on the network.
    async fn id_token(&self) -> Result<IdentityAssertion, AuthError>;

    /// Set the profile display name on the provider account.
    async fn update_profile(&self, display_name: &str) -> Result<(), AuthError>;
}

/// Sign-in and account creation capabilities of the identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Box<dyn AuthSession>, AuthError>;

    async fn sign_in_with_federated_popup(&self) -> Result<Box<dyn AuthSession>, AuthError>;

    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Box<dyn AuthSession>, AuthError>;
}
