use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use super::SessionData;
use crate::account::errors::AccountError;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(body): AppJson<SigninRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionData>), ApiError> {
    let credentials = Credentials {
        email: EmailAddress::new(body.email).map_err(AccountError::from)?,
        password: body.password,
    };

    let session = state.account_service.signin(credentials).await?;
    tracing::info!(account_id = %session.account.id, "Account signed in");

    let jar = state
        .refresh_cookie
        .set(jar, session.tokens.refresh_token.clone());

    Ok((
        jar,
        ApiSuccess::new(StatusCode::OK, "Signin successful", (&session).into()),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequest {
    email: String,
    password: String,
}
