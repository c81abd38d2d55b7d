use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use crate::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn unique_email(
    State(state): State<AppState>,
    AppJson(body): AppJson<UniqueEmailRequest>,
) -> Result<ApiSuccess<UniqueEmailData>, ApiError> {
    let email = EmailAddress::new(body.email).map_err(AccountError::from)?;

    state
        .account_service
        .ensure_email_available(&email)
        .await
        .map_err(|e| ApiError::from(e).with_value(email.as_str()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "unique email",
        UniqueEmailData {
            field_name: "email",
            value: email.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UniqueEmailRequest {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueEmailData {
    pub field_name: &'static str,
    pub value: String,
}
