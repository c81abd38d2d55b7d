use std::sync::Arc;

use async_trait::async_trait;

use crate::account::credentials::CredentialStore;
use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::Credentials;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthenticationStrategy;

/// Signin by email and password.
///
/// The password is trimmed the same way it was when the account was created.
pub struct EmailPasswordStrategy<AR>
where
    AR: AccountRepository,
{
    credentials: Arc<CredentialStore<AR>>,
}

impl<AR> EmailPasswordStrategy<AR>
where
    AR: AccountRepository,
{
    pub fn new(credentials: Arc<CredentialStore<AR>>) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl<AR> AuthenticationStrategy for EmailPasswordStrategy<AR>
where
    AR: AccountRepository,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<Account, AccountError> {
        let account = self
            .credentials
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| AccountError::EmailNotRegistered(credentials.email.to_string()))?;

        if !self
            .credentials
            .verify_password(&account, credentials.password.trim())?
        {
            return Err(AccountError::IncorrectPassword);
        }

        Ok(account)
    }
}
