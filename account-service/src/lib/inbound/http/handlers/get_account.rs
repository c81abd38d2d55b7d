use axum::http::StatusCode;
use axum::Extension;

use super::update_basic_info::AccountResponseData;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Current account, as already loaded by the auth middleware.
pub async fn get_account(
    Extension(current): Extension<AuthenticatedAccount>,
) -> ApiSuccess<AccountResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        "Account found",
        AccountResponseData {
            account: (&current.account).into(),
        },
    )
}
