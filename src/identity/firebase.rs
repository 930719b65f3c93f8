//! Firebase Authentication over its REST API.
//!
//! Endpoints used:
//! - `accounts:signInWithPassword`, `accounts:signUp`, `accounts:signInWithIdp`
//!   to obtain a session (ID token + refresh token)
//! - `accounts:update` to set the display name after sign-up
//! - `accounts:lookup` to validate an ID token on the server side
//! - `securetoken.googleapis.com/v1/token` to refresh an ID token
//!
//! The API key travels as a query parameter, so transport errors are stripped
//! of their URL before they are surfaced.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::json;
use std::{
    sync::{Arc, RwLock},
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::{AuthError, AuthSession, FederatedPopup, IdentityAssertion, IdentityProvider};
use crate::http::{build_url, sanitize_body};

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_REQUEST_URI: &str = "http://localhost";

/// A cached token closer than this to expiry is refreshed before use.
const TOKEN_REFRESH_BUFFER: Duration = Duration::from_secs(30);
/// Token lifetime assumed when the provider omits or garbles `expiresIn`.
const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;
/// Upper bound on a provider-reported lifetime.
const MAX_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

#[derive(Clone)]
pub struct FirebaseConfig {
    pub api_key: SecretString,
    pub identity_url: String,
    pub secure_token_url: String,
    /// Continue URI sent with IdP sign-in.
    pub request_uri: String,
}

impl FirebaseConfig {
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            secure_token_url: DEFAULT_SECURE_TOKEN_URL.to_string(),
            request_uri: DEFAULT_REQUEST_URI.to_string(),
        }
    }

    #[must_use]
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = url.into();
        self
    }

    #[must_use]
    pub fn with_secure_token_url(mut self, url: impl Into<String>) -> Self {
        self.secure_token_url = url.into();
        self
    }

    #[must_use]
    pub fn with_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = uri.into();
        self
    }
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &"***")
            .field("identity_url", &self.identity_url)
            .field("secure_token_url", &self.secure_token_url)
            .field("request_uri", &self.request_uri)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    disabled: bool,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Account behind a validated ID token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Low-level REST plumbing shared by the client and its sessions.
struct FirebaseApi {
    http: Client,
    config: FirebaseConfig,
}

impl FirebaseApi {
    fn accounts_url(&self, method: &str) -> String {
        build_url(&self.config.identity_url, &format!("/v1/accounts:{method}"))
    }

    async fn post_accounts<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, AuthError> {
        let response = self
            .http
            .post(self.accounts_url(method))
            .query(&[("key", self.config.api_key.expose_secret())])
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_response(response).await
    }

    async fn refresh(&self, refresh_token: &SecretString) -> Result<RefreshResponse, AuthError> {
        let url = build_url(&self.config.secure_token_url, "/v1/token");
        let response = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.expose_secret())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.expose_secret()),
            ])
            .send()
            .await
            .map_err(map_request_error)?;

        handle_response(response).await
    }
}

/// Strip the URL (it carries the API key) and classify the failure.
fn map_request_error(err: reqwest::Error) -> AuthError {
    let err = err.without_url();
    if err.is_timeout() {
        AuthError::Network("request to identity provider timed out".to_string())
    } else {
        AuthError::Network(format!("unable to reach identity provider: {err}"))
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, AuthError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|err| {
            AuthError::Provider(format!("failed to decode response: {}", err.without_url()))
        });
    }

    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => {
            debug!(
                status = status.as_u16(),
                code = %envelope.error.message,
                "identity provider rejected request"
            );
            Err(AuthError::from_provider_code(&envelope.error.message))
        }
        Err(_) => Err(AuthError::Provider(format!(
            "unexpected response ({}): {}",
            status.as_u16(),
            sanitize_body(&body)
        ))),
    }
}

fn token_ttl(expires_in: Option<&str>) -> Duration {
    let seconds = expires_in
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS)
        .min(MAX_TOKEN_TTL_SECONDS);
    Duration::from_secs(seconds)
}

fn token_expiry(now: Instant, expires_in: Option<&str>) -> Instant {
    now.checked_add(token_ttl(expires_in))
        .unwrap_or(now + Duration::from_secs(DEFAULT_TOKEN_TTL_SECONDS))
}

/// Client handle for a Firebase project. Cheap to clone.
#[derive(Clone)]
pub struct FirebaseAuth {
    api: Arc<FirebaseApi>,
    popup: Option<Arc<dyn FederatedPopup>>,
}

impl FirebaseAuth {
    #[must_use]
    pub fn new(config: FirebaseConfig, http: Client) -> Self {
        Self {
            api: Arc::new(FirebaseApi { http, config }),
            popup: None,
        }
    }

    /// Attach the capability used by federated sign-in.
    #[must_use]
    pub fn with_popup(mut self, popup: Arc<dyn FederatedPopup>) -> Self {
        self.popup = Some(popup);
        self
    }

    /// Validate an ID token by looking up the account it belongs to.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidToken` when the provider rejects the token,
    /// `AuthError::UserDisabled` for disabled accounts, or a network error.
    #[instrument(skip_all)]
    pub async fn verify_id_token(&self, id_token: &str) -> Result<VerifiedUser, AuthError> {
        let response: LookupResponse = self
            .api
            .post_accounts("lookup", &json!({ "idToken": id_token }))
            .await?;

        let user = response
            .users
            .into_iter()
            .next()
            .ok_or(AuthError::InvalidToken)?;

        if user.disabled {
            return Err(AuthError::UserDisabled);
        }

        Ok(VerifiedUser {
            uid: user.local_id,
            email: user.email,
            name: user.display_name,
        })
    }

    fn session(&self, response: SignInResponse) -> Box<dyn AuthSession> {
        Box::new(FirebaseSession::new(self.api.clone(), response, Instant::now()))
    }
}

impl std::fmt::Debug for FirebaseAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseAuth")
            .field("config", &self.api.config)
            .field("popup", &self.popup.is_some())
            .finish()
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuth {
    #[instrument(skip_all)]
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Box<dyn AuthSession>, AuthError> {
        let request = PasswordRequest {
            email,
            password: password.expose_secret(),
            return_secure_token: true,
        };
        let response: SignInResponse = self
            .api
            .post_accounts("signInWithPassword", &request)
            .await?;

        debug!(uid = %response.local_id, "password sign-in succeeded");
        Ok(self.session(response))
    }

    #[instrument(skip_all)]
    async fn sign_in_with_federated_popup(&self) -> Result<Box<dyn AuthSession>, AuthError> {
        let Some(popup) = &self.popup else {
            warn!("federated sign-in requested without a popup capability");
            return Err(AuthError::Provider(
                "federated sign-in is not configured".to_string(),
            ));
        };

        let credential = popup.open().await?;
        let body = json!({
            "postBody": credential.post_body(),
            "requestUri": self.api.config.request_uri,
            "returnSecureToken": true,
            "returnIdpCredential": true,
        });
        let response: SignInResponse = self.api.post_accounts("signInWithIdp", &body).await?;

        debug!(
            uid = %response.local_id,
            provider = %credential.provider_id,
            "federated sign-in succeeded"
        );
        Ok(self.session(response))
    }

    #[instrument(skip_all)]
    async fn create_account(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Box<dyn AuthSession>, AuthError> {
        let request = PasswordRequest {
            email,
            password: password.expose_secret(),
            return_secure_token: true,
        };
        let response: SignInResponse = self.api.post_accounts("signUp", &request).await?;

        debug!(uid = %response.local_id, "account created");
        Ok(self.session(response))
    }
}

struct TokenCache {
    id_token: SecretString,
    refresh_token: SecretString,
    expires_at: Instant,
}

impl TokenCache {
    fn needs_refresh(&self, now: Instant) -> bool {
        self.expires_at.saturating_duration_since(now) <= TOKEN_REFRESH_BUFFER
    }
}

/// Signed-in Firebase user with a self-refreshing ID token.
pub struct FirebaseSession {
    api: Arc<FirebaseApi>,
    uid: String,
    email: Option<String>,
    display_name: RwLock<Option<String>>,
    tokens: Mutex<TokenCache>,
}

impl FirebaseSession {
    fn new(api: Arc<FirebaseApi>, response: SignInResponse, now: Instant) -> Self {
        let expires_at = token_expiry(now, response.expires_in.as_deref());
        Self {
            api,
            uid: response.local_id,
            email: response.email,
            display_name: RwLock::new(response.display_name.filter(|name| !name.is_empty())),
            tokens: Mutex::new(TokenCache {
                id_token: SecretString::from(response.id_token),
                refresh_token: SecretString::from(response.refresh_token),
                expires_at,
            }),
        }
    }
}

#[async_trait]
impl AuthSession for FirebaseSession {
    fn uid(&self) -> &str {
        &self.uid
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn display_name(&self) -> Option<String> {
        self.display_name.read().ok().and_then(|name| name.clone())
    }

    #[instrument(skip_all, fields(uid = %self.uid))]
    async fn id_token(&self) -> Result<IdentityAssertion, AuthError> {
        // Holding the lock across the refresh keeps concurrent callers from
        // refreshing twice.
        let mut tokens = self.tokens.lock().await;
        if tokens.needs_refresh(Instant::now()) {
            debug!("refreshing identity token");
            let refreshed = self.api.refresh(&tokens.refresh_token).await?;
            tokens.expires_at = token_expiry(Instant::now(), refreshed.expires_in.as_deref());
            tokens.id_token = SecretString::from(refreshed.id_token);
            tokens.refresh_token = SecretString::from(refreshed.refresh_token);
        }

        Ok(IdentityAssertion::from(tokens.id_token.clone()))
    }

    #[instrument(skip_all, fields(uid = %self.uid))]
    async fn update_profile(&self, display_name: &str) -> Result<(), AuthError> {
        let id_token = self.id_token().await?;
        let body = json!({
            "idToken": id_token.expose(),
            "displayName": display_name,
            "returnSecureToken": true,
        });
        let response: UpdateResponse = self.api.post_accounts("update", &body).await?;

        // The provider may rotate tokens on profile updates.
        if let (Some(id_token), Some(refresh_token)) = (response.id_token, response.refresh_token) {
            let mut tokens = self.tokens.lock().await;
            tokens.expires_at = token_expiry(Instant::now(), response.expires_in.as_deref());
            tokens.id_token = SecretString::from(id_token);
            tokens.refresh_token = SecretString::from(refresh_token);
        }

        if let Ok(mut name) = self.display_name.write() {
            *name = Some(
                response
                    .display_name
                    .unwrap_or_else(|| display_name.to_string()),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::identity::{FederatedCredential, ProvidedCredential};
    use anyhow::Result;
    use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn auth_for(server: &MockServer) -> FirebaseAuth {
        let config = FirebaseConfig::new(SecretString::from("test-api-key".to_string()))
            .with_identity_url(server.uri())
            .with_secure_token_url(server.uri());
        FirebaseAuth::new(config, crate::http::client().unwrap())
    }

    fn sign_in_body(id_token: &str, expires_in: &str) -> serde_json::Value {
        json!({
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "uid-123",
            "email": "user@example.com",
            "displayName": "",
            "idToken": id_token,
            "registered": true,
            "refreshToken": "refresh-1",
            "expiresIn": expires_in
        })
    }

    fn error_body(message: &str) -> serde_json::Value {
        json!({ "error": { "code": 400, "message": message, "errors": [] } })
    }

    #[tokio::test]
    async fn password_sign_in_returns_session_with_token() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", "test-api-key"))
            .and(body_partial_json(json!({
                "email": "user@example.com",
                "password": "secret1",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(sign_in_body("id-1", "3600")))
            .expect(1)
            .mount(&server)
            .await;

        let auth = auth_for(&server);
        let session = auth
            .sign_in_with_password("user@example.com", &SecretString::from("secret1".to_string()))
            .await?;

        assert_eq!(session.uid(), "uid-123");
        assert_eq!(session.email(), Some("user@example.com"));
        assert_eq!(session.display_name(), None);
        assert_eq!(session.id_token().await?.expose(), "id-1");
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_maps_to_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body("INVALID_LOGIN_CREDENTIALS")))
            .mount(&server)
            .await;

        let result = auth_for(&server)
            .sign_in_with_password("user@example.com", &SecretString::from("nope123".to_string()))
            .await;
        assert_eq!(result.err(), Some(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn sign_up_conflict_maps_to_email_in_use() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body("EMAIL_EXISTS")))
            .mount(&server)
            .await;

        let result = auth_for(&server)
            .create_account("user@example.com", &SecretString::from("secret1".to_string()))
            .await;
        assert_eq!(result.err(), Some(AuthError::EmailInUse));
    }

    #[tokio::test]
    async fn non_json_error_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let result = auth_for(&server)
            .create_account("user@example.com", &SecretString::from("secret1".to_string()))
            .await;
        assert_eq!(
            result.err(),
            Some(AuthError::Provider(
                "unexpected response (503): upstream unavailable".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_network_error_without_api_key() {
        let config = FirebaseConfig::new(SecretString::from("test-api-key".to_string()))
            .with_identity_url("http://127.0.0.1:9");
        let auth = FirebaseAuth::new(config, crate::http::client().unwrap());

        let result = auth
            .sign_in_with_password("user@example.com", &SecretString::from("secret1".to_string()))
            .await;
        match result.err() {
            Some(AuthError::Network(message)) => assert!(!message.contains("test-api-key")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn near_expiry_token_is_refreshed_once() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sign_in_body("id-stale", "10")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "expires_in": "3600",
                "token_type": "Bearer",
                "refresh_token": "refresh-2",
                "id_token": "id-fresh",
                "user_id": "uid-123",
                "project_id": "demo"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = auth_for(&server)
            .sign_in_with_password("user@example.com", &SecretString::from("secret1".to_string()))
            .await?;

        assert_eq!(session.id_token().await?.expose(), "id-fresh");
        // second call uses the refreshed cache
        assert_eq!(session.id_token().await?.expose(), "id-fresh");
        Ok(())
    }

    #[tokio::test]
    async fn update_profile_sets_display_name() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sign_in_body("id-1", "3600")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:update"))
            .and(body_partial_json(json!({ "idToken": "id-1", "displayName": "Al Doe" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "uid-123",
                "email": "user@example.com",
                "displayName": "Al Doe",
                "idToken": "id-2",
                "refreshToken": "refresh-2",
                "expiresIn": "3600"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = auth_for(&server)
            .create_account("user@example.com", &SecretString::from("secret1".to_string()))
            .await?;
        session.update_profile("Al Doe").await?;

        assert_eq!(session.display_name(), Some("Al Doe".to_string()));
        assert_eq!(session.id_token().await?.expose(), "id-2");
        Ok(())
    }

    #[tokio::test]
    async fn federated_sign_in_posts_provider_credential() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithIdp"))
            .and(body_partial_json(json!({
                "postBody": "id_token=google-token&providerId=google.com",
                "requestUri": DEFAULT_REQUEST_URI,
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(sign_in_body("id-g", "3600")))
            .expect(1)
            .mount(&server)
            .await;

        let popup = ProvidedCredential::new(Some(FederatedCredential::google_id_token("google-token")));
        let auth = auth_for(&server).with_popup(Arc::new(popup));
        let session = auth.sign_in_with_federated_popup().await?;
        assert_eq!(session.id_token().await?.expose(), "id-g");
        Ok(())
    }

    #[tokio::test]
    async fn dismissed_popup_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let auth = auth_for(&server).with_popup(Arc::new(ProvidedCredential::default()));
        let result = auth.sign_in_with_federated_popup().await;
        assert_eq!(result.err(), Some(AuthError::PopupClosed));
    }

    #[tokio::test]
    async fn verify_id_token_returns_account() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:lookup"))
            .and(body_partial_json(json!({ "idToken": "id-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "identitytoolkit#GetAccountInfoResponse",
                "users": [{
                    "localId": "uid-123",
                    "email": "user@example.com",
                    "displayName": "Al Doe"
                }]
            })))
            .mount(&server)
            .await;

        let user = auth_for(&server).verify_id_token("id-1").await?;
        assert_eq!(
            user,
            VerifiedUser {
                uid: "uid-123".to_string(),
                email: Some("user@example.com".to_string()),
                name: Some("Al Doe".to_string()),
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn verify_id_token_rejects_unknown_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:lookup"))
            .respond_with(ResponseTemplate::new(400).set_body_json(error_body("INVALID_ID_TOKEN")))
            .mount(&server)
            .await;

        let result = auth_for(&server).verify_id_token("forged").await;
        assert_eq!(result.err(), Some(AuthError::InvalidToken));
    }

    #[test]
    fn token_ttl_falls_back_on_garbage() {
        assert_eq!(token_ttl(Some("120")), Duration::from_secs(120));
        assert_eq!(token_ttl(Some("soon")), Duration::from_secs(3600));
        assert_eq!(token_ttl(None), Duration::from_secs(3600));
        assert_eq!(
            token_ttl(Some("18446744073709551615")),
            Duration::from_secs(86_400)
        );
    }

    #[tokio::test]
    async fn huge_expires_in_does_not_break_sign_in() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sign_in_body("id-1", "18446744073709551615")),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/token"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let session = auth_for(&server)
            .sign_in_with_password("user@example.com", &SecretString::from("secret1".to_string()))
            .await?;
        assert_eq!(session.id_token().await?.expose(), "id-1");
        Ok(())
    }

    #[test]
    fn config_debug_redacts_api_key() {
        let config = FirebaseConfig::new(SecretString::from("very-secret".to_string()));
        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
