use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use super::Empty;
use crate::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn forget_password(
    State(state): State<AppState>,
    AppJson(body): AppJson<ForgetPasswordRequest>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(AccountError::from)?;

    state
        .account_service
        .request_password_reset(&email)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                "Please check your mail to reset password.",
                Empty {},
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgetPasswordRequest {
    email: String,
}
