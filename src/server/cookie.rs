//! Signed session cookie.
//!
//! Value layout is `base64url(claims_json) "." base64url(hmac_sha256(payload))`
//! where the MAC covers the encoded payload. The server keeps no session
//! table; the signature and `exp` are all that make a cookie valid.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, InvalidHeaderValue},
};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use utoipa::ToSchema;

use super::config::CookieConfig;
use crate::identity::VerifiedUser;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookieError {
    #[error("malformed session cookie")]
    Malformed,
    #[error("session cookie signature mismatch")]
    BadSignature,
    #[error("session cookie expired")]
    Expired,
    #[error("unusable signing key")]
    InvalidKey,
}

/// What the cookie asserts about its holder.
#[derive(ToSchema, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Issued at, seconds since the epoch.
    pub iat: u64,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
}

impl SessionClaims {
    #[must_use]
    pub fn issue(user: VerifiedUser, now: u64, max_age: u64) -> Self {
        Self {
            uid: user.uid,
            email: user.email,
            name: user.name,
            iat: now,
            exp: now.saturating_add(max_age),
        }
    }
}

#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Issues, verifies and clears the session cookie.
#[derive(Clone, Debug)]
pub struct SessionCookie {
    config: CookieConfig,
}

impl SessionCookie {
    #[must_use]
    pub const fn new(config: CookieConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CookieConfig {
        &self.config
    }

    /// Encode and sign `claims` with the current key.
    ///
    /// # Errors
    /// Returns `CookieError::InvalidKey` if the MAC cannot be keyed.
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, CookieError> {
        let json = serde_json::to_vec(claims).map_err(|_| CookieError::Malformed)?;
        let payload = Base64UrlUnpadded::encode_string(&json);
        let tag = mac(&self.config.current_key, payload.as_bytes())?
            .finalize()
            .into_bytes();
        Ok(format!("{payload}.{}", Base64UrlUnpadded::encode_string(&tag)))
    }

    /// Check the signature against the current then the previous key, then
    /// the expiry.
    ///
    /// # Errors
    /// Returns a `CookieError` describing the first check that failed.
    pub fn verify(&self, value: &str, now: u64) -> Result<SessionClaims, CookieError> {
        let (payload, signature) = value.split_once('.').ok_or(CookieError::Malformed)?;
        let signature =
            Base64UrlUnpadded::decode_vec(signature).map_err(|_| CookieError::Malformed)?;

        let keys = std::iter::once(&self.config.current_key).chain(&self.config.previous_key);
        let mut signed = false;
        for key in keys {
            if mac(key, payload.as_bytes())?
                .verify_slice(&signature)
                .is_ok()
            {
                signed = true;
                break;
            }
        }
        if !signed {
            return Err(CookieError::BadSignature);
        }

        let json = Base64UrlUnpadded::decode_vec(payload).map_err(|_| CookieError::Malformed)?;
        let claims: SessionClaims =
            serde_json::from_slice(&json).map_err(|_| CookieError::Malformed)?;

        if now >= claims.exp {
            return Err(CookieError::Expired);
        }
        Ok(claims)
    }

    /// `Set-Cookie` value carrying a freshly signed session.
    ///
    /// # Errors
    /// Returns an error if the value is not a valid header.
    pub fn set_cookie(&self, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        self.header(value, self.config.max_age)
    }

    /// `Set-Cookie` value that makes the browser drop the session.
    ///
    /// # Errors
    /// Returns an error if the value is not a valid header.
    pub fn clear_cookie(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        self.header("", 0)
    }

    /// Raw cookie value from the request, if present.
    #[must_use]
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| key.trim() == self.config.name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn header(&self, value: &str, max_age: u64) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
            self.config.name
        );
        if self.config.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }
}

fn mac(key: &SecretString, payload: &[u8]) -> Result<HmacSha256, CookieError> {
    let mut mac = HmacSha256::new_from_slice(key.expose_secret().as_bytes())
        .map_err(|_| CookieError::InvalidKey)?;
    mac.update(payload);
    Ok(mac)
}
