use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::Empty;
use crate::inbound::http::router::AppState;

pub async fn confirm_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    state
        .account_service
        .confirm_email(&token)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, "Account verification successful.", Empty {}))
}
