//! Cookie exchange endpoint.
//!
//! `GET /api/login` trades a bearer identity token for a signed session
//! cookie, `GET /api/logout` clears it and `GET /api/session` reports who the
//! cookie belongs to.

pub mod config;
pub mod cookie;
pub(crate) mod handlers;
mod openapi;
pub mod verifier;

pub use config::CookieConfig;
pub use cookie::{CookieError, SessionClaims, SessionCookie};
pub use openapi::openapi;
pub use verifier::TokenVerifier;

use anyhow::{Context, Result, anyhow};
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{
        HeaderName, HeaderValue, Method, Request,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, info, info_span};
use ulid::Ulid;
use url::Url;

use crate::exchange::LOGIN_PATH;

/// Shared handler state.
pub struct AppState {
    pub cookie: SessionCookie,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    #[must_use]
    pub fn new(cookie: CookieConfig, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            cookie: SessionCookie::new(cookie),
            verifier,
        }
    }
}

/// Build the router with request ids, tracing and CORS.
///
/// # Errors
/// Returns an error if `app_url` is not a usable origin.
pub fn router(state: Arc<AppState>, app_url: Option<&str>) -> Result<Router> {
    let mut cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET])
        .allow_credentials(true);
    if let Some(app_url) = app_url {
        cors = cors.allow_origin(AllowOrigin::exact(frontend_origin(app_url)?));
    }

    let app = Router::new()
        .route("/health", get(handlers::health).options(handlers::health))
        .route(LOGIN_PATH, get(handlers::login))
        .route("/api/logout", get(handlers::logout))
        .route("/api/session", get(handlers::session))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(state)),
        );

    Ok(app)
}

/// Start the server on `port`.
///
/// # Errors
/// Return error if the port cannot be bound or the server fails.
pub async fn new(port: u16, state: Arc<AppState>, app_url: Option<String>) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    serve(listener, state, app_url.as_deref()).await
}

/// Serve on an already bound listener until ctrl-c.
///
/// # Errors
/// Return error if the router cannot be built or serving fails.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    app_url: Option<&str>,
) -> Result<()> {
    let app = router(state, app_url)?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn frontend_origin(app_url: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(app_url).with_context(|| format!("Invalid app URL: {app_url}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("App URL must include a valid host: {app_url}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build app origin header")
}
