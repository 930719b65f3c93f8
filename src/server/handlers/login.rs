use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

use super::extract_bearer_token;
use crate::{
    identity::AuthError,
    server::{
        AppState,
        cookie::{SessionClaims, unix_now},
    },
};

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct LoginResponse {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[utoipa::path(
    get,
    path= "/api/login",
    responses (
        (status = 200, description = "Identity token accepted, session cookie set", body = LoginResponse),
        (status = 401, description = "Missing, malformed or rejected identity token"),
        (status = 502, description = "Identity provider unreachable"),
    ),
    tag= "session"
)]
#[instrument(skip_all)]
pub async fn login(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    let Some(token) = extract_bearer_token(&headers) else {
        debug!("login without bearer token");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let user = match state.verifier.verify(&token).await {
        Ok(user) => user,
        Err(err @ (AuthError::Network(_) | AuthError::Provider(_))) => {
            error!("Failed to verify identity token: {err}");
            return StatusCode::BAD_GATEWAY.into_response();
        }
        Err(err) => {
            warn!("Identity token rejected: {err}");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    let claims = SessionClaims::issue(user, unix_now(), state.cookie.config().max_age);
    let cookie = match state
        .cookie
        .sign(&claims)
        .map_err(|err| err.to_string())
        .and_then(|value| state.cookie.set_cookie(&value).map_err(|err| err.to_string()))
    {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    info!(uid = %claims.uid, "session cookie issued");

    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, cookie);
    let body = LoginResponse {
        uid: claims.uid,
        email: claims.email,
        name: claims.name,
    };
    (StatusCode::OK, response_headers, Json(body)).into_response()
}
