use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::error;

use crate::server::AppState;

#[utoipa::path(
    get,
    path= "/api/logout",
    responses (
        (status = 204, description = "Session cookie cleared"),
    ),
    tag= "session"
)]
pub async fn logout(state: Extension<Arc<AppState>>) -> impl IntoResponse {
    // Always clear, whether or not a cookie was sent.
    let mut response_headers = HeaderMap::new();
    match state.cookie.clear_cookie() {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clearing cookie: {err}"),
    }
    (StatusCode::NO_CONTENT, response_headers)
}
