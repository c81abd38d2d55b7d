use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use super::Empty;
use crate::account::errors::AccountError;
use crate::domain::account::models::ChangePasswordCommand;
use crate::domain::account::models::PlainPassword;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
    AppJson(body): AppJson<ChangePasswordRequest>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    let new_password = PlainPassword::new(body.new_password)
        .map_err(|e| ApiError::from(AccountError::from(e)).with_field("newPassword"))?;

    let command = ChangePasswordCommand {
        old_password: body.old_password,
        new_password,
        confirm_password: body.confirm_password.trim().to_string(),
    };

    state
        .account_service
        .change_password(&current.account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, "Password has changed successfully.", Empty {}))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    old_password: String,
    new_password: String,
    confirm_password: String,
}
