use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::Session;

pub mod change_password;
pub mod confirm_email;
pub mod forget_password;
pub mod get_account;
pub mod list_accounts;
pub mod logout;
pub mod refresh_token;
pub mod reset_password;
pub mod signin;
pub mod signup;
pub mod unique_email;
pub mod update_basic_info;
pub mod upload_avatar;

/// JSON extractor whose rejections use the API error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Success body: a message with the payload fields alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    message: String,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Payload of responses that carry only a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Empty {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ApiErrorData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_name: None,
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(ApiErrorData),
    Unauthorized(ApiErrorData),
    Forbidden(ApiErrorData),
    NotFound(ApiErrorData),
    Conflict(ApiErrorData),
    BadGateway(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(ApiErrorData::new(message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(ApiErrorData::new(message))
    }

    /// Point the error at a different request field.
    pub fn with_field(mut self, field_name: &str) -> Self {
        if let Some(data) = self.data_mut() {
            data.field_name = Some(field_name.to_string());
        }
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        if let Some(data) = self.data_mut() {
            data.value = Some(value.into());
        }
        self
    }

    fn data_mut(&mut self) -> Option<&mut ApiErrorData> {
        match self {
            ApiError::BadRequest(data)
            | ApiError::Unauthorized(data)
            | ApiError::Forbidden(data)
            | ApiError::NotFound(data)
            | ApiError::Conflict(data) => Some(data),
            ApiError::InternalServerError(_) | ApiError::BadGateway(_) => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, data) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorData::new("Internal server error"),
                )
            }
            ApiError::BadGateway(msg) => {
                tracing::error!(error = %msg, "Upstream failure");
                (StatusCode::BAD_GATEWAY, ApiErrorData::new(msg))
            }
            ApiError::BadRequest(data) => (StatusCode::BAD_REQUEST, data),
            ApiError::Unauthorized(data) => (StatusCode::UNAUTHORIZED, data),
            ApiError::Forbidden(data) => (StatusCode::FORBIDDEN, data),
            ApiError::NotFound(data) => (StatusCode::NOT_FOUND, data),
            ApiError::Conflict(data) => (StatusCode::CONFLICT, data),
        };

        (status, Json(data)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let data = ApiErrorData {
            message: err.to_string(),
            field_name: err.field_name().map(str::to_string),
            value: None,
        };

        match err {
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidName(_)
            | AccountError::InvalidContactNumber(_)
            | AccountError::InvalidAddress(_)
            | AccountError::InvalidRole(_)
            | AccountError::InvalidPassword(_)
            | AccountError::InvalidUpload(_)
            | AccountError::PasswordConfirmationMismatch(_)
            | AccountError::PasswordUnchanged
            | AccountError::IncorrectOldPassword => ApiError::BadRequest(data),
            AccountError::EmailNotRegistered(_) | AccountError::IncorrectPassword => {
                ApiError::Unauthorized(data)
            }
            AccountError::InvalidToken(_) => ApiError::Forbidden(data),
            AccountError::NotFound(_) | AccountError::EmailNotAssociated(_) => {
                ApiError::NotFound(data)
            }
            AccountError::EmailAlreadyExists(_) | AccountError::AlreadyVerified => {
                ApiError::Conflict(data)
            }
            AccountError::Storage(_) => ApiError::BadGateway(err.to_string()),
            AccountError::Password(_)
            | AccountError::TokenIssue(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Account as returned to clients. The password hash is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub contact_no: String,
    pub role: String,
    pub is_verified: bool,
    pub avatar: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.as_str().to_string(),
            name: account.name.as_str().to_string(),
            contact_no: account.contact_no.as_str().to_string(),
            role: account.role.as_str().to_string(),
            is_verified: account.is_verified,
            avatar: account.avatar.clone(),
            address: account.address.as_ref().map(|a| a.as_str().to_string()),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub account: AccountData,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&Session> for SessionData {
    fn from(session: &Session) -> Self {
        Self {
            account: (&session.account).into(),
            access_token: session.tokens.access_token.clone(),
            refresh_token: session.tokens.refresh_token.clone(),
        }
    }
}
