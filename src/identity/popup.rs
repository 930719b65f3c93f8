//! Federated (popup) sign-in credentials.
//!
//! A browser opens a provider popup and receives a provider credential. Outside
//! a browser the credential has to come from somewhere else, so the popup is a
//! capability: anything that can produce a `FederatedCredential` or report that
//! the user walked away.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use url::form_urlencoded;

use super::AuthError;

pub const GOOGLE_PROVIDER_ID: &str = "google.com";

/// Provider credential handed to the identity provider's IdP sign-in.
#[derive(Clone, Debug)]
pub struct FederatedCredential {
    pub provider_id: String,
    pub id_token: Option<SecretString>,
    pub access_token: Option<SecretString>,
}

impl FederatedCredential {
    #[must_use]
    pub fn google_id_token(token: impl Into<String>) -> Self {
        Self {
            provider_id: GOOGLE_PROVIDER_ID.to_string(),
            id_token: Some(SecretString::from(token.into())),
            access_token: None,
        }
    }

    /// Form-encoded `postBody` for `accounts:signInWithIdp`.
    #[must_use]
    pub fn post_body(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(token) = &self.id_token {
            serializer.append_pair("id_token", token.expose_secret());
        }
        if let Some(token) = &self.access_token {
            serializer.append_pair("access_token", token.expose_secret());
        }
        serializer.append_pair("providerId", &self.provider_id);
        serializer.finish()
    }
}

#[async_trait]
pub trait FederatedPopup: Send + Sync {
    /// Run the provider consent step.
    ///
    /// Returns `AuthError::PopupClosed` when the user dismisses it.
    async fn open(&self) -> Result<FederatedCredential, AuthError>;
}

/// Popup stand-in for non-browser front ends: the provider credential was
/// obtained out of band and passed in. No credential means the popup was
/// dismissed.
#[derive(Clone, Debug, Default)]
pub struct ProvidedCredential {
    credential: Option<FederatedCredential>,
}

impl ProvidedCredential {
    #[must_use]
    pub fn new(credential: Option<FederatedCredential>) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl FederatedPopup for ProvidedCredential {
    async fn open(&self) -> Result<FederatedCredential, AuthError> {
        self.credential.clone().ok_or(AuthError::PopupClosed)
    }
}
