use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange the refresh token for a new pair.
///
/// The `aid` cookie is preferred; a `refreshToken` body field is accepted
/// for clients that cannot keep cookies.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshTokenRequest>>,
) -> Result<(CookieJar, ApiSuccess<TokenPairData>), ApiError> {
    let token = state
        .refresh_cookie
        .get(&jar)
        .or_else(|| body.and_then(|Json(body)| body.refresh_token))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::bad_request("Refresh token required"))?;

    let tokens = state.account_service.refresh_session(&token).await?;

    let jar = state.refresh_cookie.set(jar, tokens.refresh_token.clone());

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            "Token refreshed",
            TokenPairData {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
}
