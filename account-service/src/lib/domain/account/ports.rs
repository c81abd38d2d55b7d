use async_trait::async_trait;
use auth::TokenPair;

use crate::account::errors::AccountError;
use crate::account::errors::MailError;
use crate::account::errors::StorageError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AvatarUpload;
use crate::account::models::ChangePasswordCommand;
use crate::account::models::CreateAccountCommand;
use crate::account::models::Credentials;
use crate::account::models::EmailAddress;
use crate::account::models::FileKind;
use crate::account::models::HashedPassword;
use crate::account::models::ResetPasswordCommand;
use crate::account::models::Session;
use crate::account::models::StoredFile;
use crate::account::models::StoredObject;
use crate::account::models::UpdateBasicInfoCommand;

/// Port for account workflows exposed to the inbound adapters.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and open a session for it.
    ///
    /// Queues a confirmation mail; failure to deliver it does not fail signup.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: CreateAccountCommand) -> Result<Session, AccountError>;

    /// Check credentials with the configured strategy and open a session.
    ///
    /// # Errors
    /// * `EmailNotRegistered` - No account with this email
    /// * `IncorrectPassword` - Password does not match
    async fn signin(&self, credentials: Credentials) -> Result<Session, AccountError>;

    /// Exchange a refresh token for a new access/refresh pair.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is forged, malformed or expired
    /// * `NotFound` - Subject no longer exists
    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, AccountError>;

    /// Mark the account named by an email-confirmation token as verified.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is forged, malformed or expired
    /// * `NotFound` - Subject no longer exists
    /// * `AlreadyVerified` - Account was verified before
    async fn confirm_email(&self, token: &str) -> Result<(), AccountError>;

    /// Succeed when no account uses `email`.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    async fn ensure_email_available(&self, email: &EmailAddress) -> Result<(), AccountError>;

    /// Retrieve account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;

    /// Retrieve all accounts.
    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError>;

    /// Replace the password after checking the current one.
    ///
    /// # Errors
    /// * `IncorrectOldPassword` - Current password does not match
    /// * `PasswordUnchanged` - New password equals the old one
    /// * `PasswordConfirmationMismatch` - Confirmation differs from the new password
    async fn change_password(
        &self,
        id: &AccountId,
        command: ChangePasswordCommand,
    ) -> Result<(), AccountError>;

    /// Mail a password-reset link to the account owning `email`.
    ///
    /// # Errors
    /// * `EmailNotAssociated` - No account with this email
    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), AccountError>;

    /// Set a new password using a password-reset token.
    ///
    /// # Errors
    /// * `PasswordConfirmationMismatch` - Confirmation differs from the new password
    /// * `InvalidToken` - Token is forged, malformed or expired
    /// * `NotFound` - Subject no longer exists
    async fn reset_password(
        &self,
        token: &str,
        command: ResetPasswordCommand,
    ) -> Result<(), AccountError>;

    /// Replace name, contact number and address.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn update_basic_info(
        &self,
        id: &AccountId,
        command: UpdateBasicInfoCommand,
    ) -> Result<Account, AccountError>;

    /// Validate and store a new avatar image, returning the updated account.
    ///
    /// # Errors
    /// * `InvalidUpload` - Mime type not allowed or file too large
    /// * `Storage` - Object storage rejected the upload
    /// * `NotFound` - Account does not exist
    async fn upload_avatar(
        &self,
        id: &AccountId,
        upload: AvatarUpload,
    ) -> Result<Account, AccountError>;
}

/// Pluggable credential check used by signin.
#[async_trait]
pub trait AuthenticationStrategy: Send + Sync + 'static {
    /// Resolve credentials to the account they belong to.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Account, AccountError>;
}

/// Persistence operations for account aggregate.
///
/// Implementations never hash: they receive and return [`HashedPassword`]s.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist new account to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email unique index rejected the insert
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Retrieve all accounts from storage, newest first.
    async fn list_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Store a new password hash.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn update_password(
        &self,
        id: &AccountId,
        password_hash: &HashedPassword,
    ) -> Result<(), AccountError>;

    /// Write name, contact number and address only; other columns keep
    /// whatever is stored at write time.
    ///
    /// # Returns
    /// The account as stored after the write
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn update_basic_info(
        &self,
        id: &AccountId,
        command: &UpdateBasicInfoCommand,
    ) -> Result<Account, AccountError>;

    /// Write the avatar URL only.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    async fn set_avatar(&self, id: &AccountId, avatar_url: &str) -> Result<Account, AccountError>;

    /// Flip the verified flag from false to true in a single conditional write.
    ///
    /// # Returns
    /// False when no unverified account with this id exists
    async fn mark_verified(&self, id: &AccountId) -> Result<bool, AccountError>;
}

/// Persistence operations for uploaded file metadata.
#[async_trait]
pub trait FileRepository: Send + Sync + 'static {
    async fn create(&self, file: StoredFile) -> Result<StoredFile, AccountError>;

    /// Soft-delete every live file of `kind` owned by the account.
    ///
    /// # Returns
    /// Number of records flagged
    async fn mark_removed(
        &self,
        account_id: &AccountId,
        kind: FileKind,
    ) -> Result<u64, AccountError>;
}

/// Outbound mail delivery.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send the email-confirmation link for a freshly registered account.
    async fn send_account_confirmation(
        &self,
        recipient: &MailRecipient,
        token: &str,
    ) -> Result<(), MailError>;

    /// Send the password-reset link.
    async fn send_password_reset(
        &self,
        recipient: &MailRecipient,
        token: &str,
    ) -> Result<(), MailError>;
}

/// Who a mail is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRecipient {
    pub email: String,
    pub name: String,
}

impl From<&Account> for MailRecipient {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.as_str().to_string(),
            name: account.name.as_str().to_string(),
        }
    }
}

/// Object storage for uploaded files.
#[async_trait]
pub trait ObjectStorage: Send + Sync + 'static {
    /// Store `body` under `key` and return its public location.
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;
}
