use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use super::SessionData;
use crate::account::errors::AccountError;
use crate::domain::account::models::AccountName;
use crate::domain::account::models::ContactNumber;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PlainPassword;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(body): AppJson<SignupRequest>,
) -> Result<(CookieJar, ApiSuccess<SessionData>), ApiError> {
    let session = state
        .account_service
        .signup(body.try_into_command()?)
        .await?;

    let jar = state
        .refresh_cookie
        .set(jar, session.tokens.refresh_token.clone());

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::CREATED,
            "Account created successfully",
            (&session).into(),
        ),
    ))
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    name: String,
    email: String,
    password: String,
    confirm_password: Option<String>,
    contact_no: String,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<CreateAccountCommand, AccountError> {
        let name = AccountName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let contact_no = ContactNumber::new(self.contact_no)?;
        let password = PlainPassword::new(self.password)?;

        if let Some(confirm) = self.confirm_password {
            if confirm.trim() != password.as_str() {
                return Err(AccountError::PasswordConfirmationMismatch("password"));
            }
        }

        Ok(CreateAccountCommand::new(email, name, contact_no, password))
    }
}
