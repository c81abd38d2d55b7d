use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use super::Empty;
use crate::account::errors::AccountError;
use crate::domain::account::models::PlainPassword;
use crate::domain::account::models::ResetPasswordCommand;
use crate::inbound::http::router::AppState;

pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    AppJson(body): AppJson<ResetPasswordRequest>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    let new_password = PlainPassword::new(body.new_password)
        .map_err(|e| ApiError::from(AccountError::from(e)).with_field("newPassword"))?;

    let command = ResetPasswordCommand {
        new_password,
        confirm_password: body.confirm_password.trim().to_string(),
    };

    state
        .account_service
        .reset_password(&token, command)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, "Password has reset successfully.", Empty {}))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    new_password: String,
    confirm_password: String,
}
