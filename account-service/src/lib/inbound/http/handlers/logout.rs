use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::ApiSuccess;
use super::Empty;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<Empty>) {
    (
        state.refresh_cookie.clear(jar),
        ApiSuccess::new(StatusCode::OK, "User logout successfully", Empty {}),
    )
}
