use super::{
    cookie::SessionClaims,
    handlers::{self, health::Health, login::LoginResponse},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::login::login,
        handlers::logout::logout,
        handlers::session::session,
    ),
    components(schemas(Health, LoginResponse, SessionClaims)),
    tags(
        (name = "health", description = "Liveness"),
        (name = "session", description = "Cookie-backed session exchange"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
