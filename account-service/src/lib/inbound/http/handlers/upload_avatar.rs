use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::errors::UploadError;
use crate::domain::account::models::AvatarUpload;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

const FILE_FIELD: &str = "file";

pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedAccount>,
    multipart: Multipart,
) -> Result<ApiSuccess<AvatarData>, ApiError> {
    let upload = read_file_field(multipart)
        .await?
        .ok_or(AccountError::InvalidUpload(UploadError::MissingFile))?;

    let account = state
        .account_service
        .upload_avatar(&current.account.id, upload)
        .await?;

    tracing::info!(account_id = %account.id, "Avatar updated");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "Avatar uploaded successfully",
        AvatarData {
            avatar: account.avatar,
        },
    ))
}

async fn read_file_field(mut multipart: Multipart) -> Result<Option<AvatarUpload>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        if file_name.is_empty() && bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(AvatarUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }

    Ok(None)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarData {
    pub avatar: Option<String>,
}
