use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tracing::debug;

use crate::server::{
    AppState,
    cookie::{SessionClaims, unix_now},
};

#[utoipa::path(
    get,
    path= "/api/session",
    responses (
        (status = 200, description = "Session cookie is valid", body = SessionClaims),
        (status = 204, description = "No valid session"),
    ),
    tag= "session"
)]
pub async fn session(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    // Missing and invalid cookies look the same to the caller.
    let Some(value) = state.cookie.extract(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match state.cookie.verify(&value, unix_now()) {
        Ok(claims) => (StatusCode::OK, Json(claims)).into_response(),
        Err(err) => {
            debug!("Ignoring session cookie: {err}");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
