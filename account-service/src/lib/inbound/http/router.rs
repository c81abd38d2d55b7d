use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookie::RefreshCookie;
use super::handlers::change_password::change_password;
use super::handlers::confirm_email::confirm_email;
use super::handlers::forget_password::forget_password;
use super::handlers::get_account::get_account;
use super::handlers::list_accounts::list_accounts;
use super::handlers::logout::logout;
use super::handlers::refresh_token::refresh_token;
use super::handlers::reset_password::reset_password;
use super::handlers::signin::signin;
use super::handlers::signup::signup;
use super::handlers::unique_email::unique_email;
use super::handlers::update_basic_info::update_basic_info;
use super::handlers::upload_avatar::upload_avatar;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::AccountServicePort;

/// Smallest body limit for the avatar route.
const MIN_UPLOAD_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub authenticator: Arc<Authenticator>,
    pub refresh_cookie: RefreshCookie,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    authenticator: Arc<Authenticator>,
    refresh_cookie: RefreshCookie,
    allowed_origins: &[String],
    avatar_max_bytes: u64,
) -> Router {
    let state = AppState {
        account_service,
        authenticator,
        refresh_cookie,
    };

    let public_routes = Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/refresh-token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/unique-email", post(unique_email))
        .route("/confirmation/:token", get(confirm_email))
        .route("/forget-password", post(forget_password))
        .route("/reset-password/:token", post(reset_password));

    let protected_routes = Router::new()
        .route("/", get(get_account))
        .route("/all", get(list_accounts))
        .route("/change-password", post(change_password))
        .route("/basic-info", put(update_basic_info))
        .route(
            "/avatar",
            put(upload_avatar).layer(DefaultBodyLimit::max(upload_body_limit(avatar_max_bytes))),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    let accounts = Router::new().merge(public_routes).merge(protected_routes);

    Router::new()
        .nest("/api/v1/accounts", accounts)
        .layer(trace_layer)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Body limit for avatar uploads.
///
/// Files somewhat over the avatar limit must still reach the handler so the
/// client gets the size message instead of a transport error.
fn upload_body_limit(avatar_max_bytes: u64) -> usize {
    usize::try_from(avatar_max_bytes.saturating_mul(2))
        .unwrap_or(usize::MAX)
        .max(MIN_UPLOAD_BODY_BYTES)
}

/// Any origin when none are configured; otherwise the listed origins with
/// credentials, so the refresh cookie can cross origins.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
