use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use crate::account::errors::AccountError;
use crate::domain::account::models::AccountName;
use crate::domain::account::models::Address;
use crate::domain::account::models::ContactNumber;
use crate::domain::account::models::UpdateBasicInfoCommand;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn update_basic_info(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
    AppJson(body): AppJson<UpdateBasicInfoRequest>,
) -> Result<ApiSuccess<AccountResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .account_service
        .update_basic_info(&current.account.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(
                StatusCode::OK,
                "Basic information updated.",
                AccountResponseData {
                    account: account.into(),
                },
            )
        })
}

/// HTTP request body for updating profile fields (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBasicInfoRequest {
    name: String,
    contact_no: String,
    address: String,
}

impl UpdateBasicInfoRequest {
    fn try_into_command(self) -> Result<UpdateBasicInfoCommand, AccountError> {
        Ok(UpdateBasicInfoCommand {
            name: AccountName::new(self.name)?,
            contact_no: ContactNumber::new(self.contact_no)?,
            address: Address::new(self.address)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponseData {
    pub account: AccountData,
}
