use std::sync::Arc;

use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::HashedPassword;
use crate::account::models::PlainPassword;
use crate::account::models::Role;
use crate::account::models::UpdateBasicInfoCommand;
use crate::account::ports::AccountRepository;

/// Write path for accounts that owns password hashing.
///
/// Plaintext passwords enter only through [`CredentialStore::create`] and
/// [`CredentialStore::update_password`], and are hashed before the repository
/// sees them. Profile writes name the columns they change and never carry
/// the hash.
pub struct CredentialStore<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> CredentialStore<AR>
where
    AR: AccountRepository,
{
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Hash the password and persist a new, unverified account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email unique index rejected the insert
    /// * `Password` - Hashing failed
    pub async fn create(&self, command: CreateAccountCommand) -> Result<Account, AccountError> {
        let password_hash = self.hash(&command.password)?;
        let now = Utc::now();

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            name: command.name,
            contact_no: command.contact_no,
            role: Role::default(),
            is_verified: false,
            avatar: None,
            address: None,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(account).await
    }

    /// # Errors
    /// * `NotFound` - Account does not exist
    pub async fn find(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    pub async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountError> {
        self.repository.find_by_email(email).await
    }

    pub async fn list(&self) -> Result<Vec<Account>, AccountError> {
        self.repository.list_all().await
    }

    /// Rehash and store a new password.
    pub async fn update_password(
        &self,
        id: &AccountId,
        password: &PlainPassword,
    ) -> Result<(), AccountError> {
        let password_hash = self.hash(password)?;
        self.repository.update_password(id, &password_hash).await
    }

    pub async fn update_basic_info(
        &self,
        id: &AccountId,
        command: &UpdateBasicInfoCommand,
    ) -> Result<Account, AccountError> {
        self.repository.update_basic_info(id, command).await
    }

    pub async fn set_avatar(&self, id: &AccountId, avatar_url: &str) -> Result<Account, AccountError> {
        self.repository.set_avatar(id, avatar_url).await
    }

    pub async fn mark_verified(&self, id: &AccountId) -> Result<bool, AccountError> {
        self.repository.mark_verified(id).await
    }

    /// Compare a plaintext password with the account's stored hash.
    pub fn verify_password(&self, account: &Account, password: &str) -> Result<bool, AccountError> {
        Ok(self
            .authenticator
            .verify_password(password, account.password_hash.as_str())?)
    }

    fn hash(&self, password: &PlainPassword) -> Result<HashedPassword, AccountError> {
        let hash = self.authenticator.hash_password(password.as_str())?;
        Ok(HashedPassword::from_hash(hash))
    }
}
