use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ListAccountsData>, ApiError> {
    state
        .account_service
        .list_accounts()
        .await
        .map_err(ApiError::from)
        .map(|accounts| {
            ApiSuccess::new(
                StatusCode::OK,
                "Accounts found",
                ListAccountsData {
                    accounts: accounts.iter().map(AccountData::from).collect(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListAccountsData {
    pub accounts: Vec<AccountData>,
}
