use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::TokenKind;
use auth::TokenPair;
use chrono::Utc;

use crate::account::credentials::CredentialStore;
use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AvatarPolicy;
use crate::account::models::AvatarUpload;
use crate::account::models::ChangePasswordCommand;
use crate::account::models::CreateAccountCommand;
use crate::account::models::Credentials;
use crate::account::models::EmailAddress;
use crate::account::models::FileId;
use crate::account::models::FileKind;
use crate::account::models::ResetPasswordCommand;
use crate::account::models::Session;
use crate::account::models::StoredFile;
use crate::account::models::UpdateBasicInfoCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::AuthenticationStrategy;
use crate::account::ports::FileRepository;
use crate::account::ports::MailRecipient;
use crate::account::ports::Mailer;
use crate::account::ports::ObjectStorage;
use crate::account::strategy::EmailPasswordStrategy;

#[derive(Debug, Clone, Copy)]
enum MailKind {
    AccountConfirmation,
    PasswordReset,
}

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR, FR, M, S>
where
    AR: AccountRepository,
    FR: FileRepository,
    M: Mailer,
    S: ObjectStorage,
{
    credentials: Arc<CredentialStore<AR>>,
    files: Arc<FR>,
    mailer: Arc<M>,
    storage: Arc<S>,
    authenticator: Arc<Authenticator>,
    strategy: Box<dyn AuthenticationStrategy>,
    avatar_policy: AvatarPolicy,
}

impl<AR, FR, M, S> AccountService<AR, FR, M, S>
where
    AR: AccountRepository,
    FR: FileRepository,
    M: Mailer,
    S: ObjectStorage,
{
    /// Create a new account service with injected dependencies.
    ///
    /// Signin uses [`EmailPasswordStrategy`] until replaced with
    /// [`AccountService::with_strategy`].
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `files` - File metadata persistence implementation
    /// * `mailer` - Outbound mail delivery
    /// * `storage` - Object storage for avatars
    /// * `authenticator` - Shared password hasher and token issuer
    /// * `avatar_policy` - Accepted avatar mime types and size
    pub fn new(
        repository: Arc<AR>,
        files: Arc<FR>,
        mailer: Arc<M>,
        storage: Arc<S>,
        authenticator: Arc<Authenticator>,
        avatar_policy: AvatarPolicy,
    ) -> Self {
        let credentials = Arc::new(CredentialStore::new(repository, Arc::clone(&authenticator)));
        let strategy = Box::new(EmailPasswordStrategy::new(Arc::clone(&credentials)));

        Self {
            credentials,
            files,
            mailer,
            storage,
            authenticator,
            strategy,
            avatar_policy,
        }
    }

    /// Replace the signin strategy.
    pub fn with_strategy(mut self, strategy: impl AuthenticationStrategy) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    fn open_session(&self, account: Account) -> Result<Session, AccountError> {
        let tokens = self.issue_session(&account)?;
        Ok(Session { account, tokens })
    }

    fn issue_session(&self, account: &Account) -> Result<TokenPair, AccountError> {
        self.authenticator
            .issue_session(account.id, account.email.as_str())
            .map_err(|e| AccountError::TokenIssue(e.to_string()))
    }

    /// Verify a token and load the account it names.
    ///
    /// Expired and forged tokens are reported the same way.
    async fn resolve_token(&self, kind: TokenKind, token: &str) -> Result<Account, AccountError> {
        let claims: Claims = self
            .authenticator
            .validate_token(kind, token)
            .map_err(|e| {
                tracing::debug!(kind = %kind, error = %e, "Token rejected");
                AccountError::InvalidToken(kind)
            })?;

        let id = AccountId::from_string(&claims.sub).map_err(|_| AccountError::InvalidToken(kind))?;

        self.credentials.find(&id).await
    }

    /// Issue a mail token and deliver it in the background.
    ///
    /// Delivery failures are logged and never reach the caller.
    fn dispatch_mail(&self, kind: MailKind, account: &Account) {
        let token_kind = match kind {
            MailKind::AccountConfirmation => TokenKind::EmailConfirmation,
            MailKind::PasswordReset => TokenKind::PasswordReset,
        };

        let token = match self
            .authenticator
            .issue_token(token_kind, account.id, account.email.as_str())
        {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(account_id = %account.id, error = %e, "Failed to issue {} token", token_kind);
                return;
            }
        };

        let mailer = Arc::clone(&self.mailer);
        let recipient = MailRecipient::from(account);
        let account_id = account.id;

        tokio::spawn(async move {
            let result = match kind {
                MailKind::AccountConfirmation => {
                    mailer.send_account_confirmation(&recipient, &token).await
                }
                MailKind::PasswordReset => mailer.send_password_reset(&recipient, &token).await,
            };

            match result {
                Ok(()) => tracing::info!(account_id = %account_id, ?kind, "Mail delivered"),
                Err(e) => {
                    tracing::warn!(account_id = %account_id, ?kind, error = %e, "Mail delivery failed")
                }
            }
        });
    }
}

#[async_trait]
impl<AR, FR, M, S> AccountServicePort for AccountService<AR, FR, M, S>
where
    AR: AccountRepository,
    FR: FileRepository,
    M: Mailer,
    S: ObjectStorage,
{
    async fn signup(&self, command: CreateAccountCommand) -> Result<Session, AccountError> {
        let account = self.credentials.create(command).await?;
        tracing::info!(account_id = %account.id, "Account created");

        self.dispatch_mail(MailKind::AccountConfirmation, &account);

        self.open_session(account)
    }

    async fn signin(&self, credentials: Credentials) -> Result<Session, AccountError> {
        let account = self.strategy.authenticate(&credentials).await?;
        self.open_session(account)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, AccountError> {
        let account = self.resolve_token(TokenKind::Refresh, refresh_token).await?;
        self.issue_session(&account)
    }

    async fn confirm_email(&self, token: &str) -> Result<(), AccountError> {
        let account = self
            .resolve_token(TokenKind::EmailConfirmation, token)
            .await?;

        if account.is_verified {
            return Err(AccountError::AlreadyVerified);
        }

        // A concurrent confirmation may have won the write.
        if !self.credentials.mark_verified(&account.id).await? {
            return Err(AccountError::AlreadyVerified);
        }

        tracing::info!(account_id = %account.id, "Account verified");
        Ok(())
    }

    async fn ensure_email_available(&self, email: &EmailAddress) -> Result<(), AccountError> {
        match self.credentials.find_by_email(email).await? {
            Some(_) => Err(AccountError::EmailAlreadyExists(email.to_string())),
            None => Ok(()),
        }
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.credentials.find(id).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, AccountError> {
        self.credentials.list().await
    }

    async fn change_password(
        &self,
        id: &AccountId,
        command: ChangePasswordCommand,
    ) -> Result<(), AccountError> {
        if command.new_password.as_str() == command.old_password.trim() {
            return Err(AccountError::PasswordUnchanged);
        }

        if command.confirm_password != command.new_password.as_str() {
            return Err(AccountError::PasswordConfirmationMismatch("new password"));
        }

        let account = self.credentials.find(id).await?;

        if !self
            .credentials
            .verify_password(&account, command.old_password.trim())?
        {
            return Err(AccountError::IncorrectOldPassword);
        }

        self.credentials
            .update_password(&account.id, &command.new_password)
            .await?;

        tracing::info!(account_id = %account.id, "Password changed");
        Ok(())
    }

    async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), AccountError> {
        let account = self
            .credentials
            .find_by_email(email)
            .await?
            .ok_or_else(|| AccountError::EmailNotAssociated(email.to_string()))?;

        self.dispatch_mail(MailKind::PasswordReset, &account);
        Ok(())
    }

    async fn reset_password(
        &self,
        token: &str,
        command: ResetPasswordCommand,
    ) -> Result<(), AccountError> {
        if command.confirm_password != command.new_password.as_str() {
            return Err(AccountError::PasswordConfirmationMismatch("new password"));
        }

        let account = self.resolve_token(TokenKind::PasswordReset, token).await?;

        self.credentials
            .update_password(&account.id, &command.new_password)
            .await?;

        tracing::info!(account_id = %account.id, "Password reset");
        Ok(())
    }

    async fn update_basic_info(
        &self,
        id: &AccountId,
        command: UpdateBasicInfoCommand,
    ) -> Result<Account, AccountError> {
        self.credentials.update_basic_info(id, &command).await
    }

    async fn upload_avatar(
        &self,
        id: &AccountId,
        upload: AvatarUpload,
    ) -> Result<Account, AccountError> {
        self.avatar_policy.validate(&upload)?;

        let account = self.credentials.find(id).await?;

        let now = Utc::now();
        let key = self
            .avatar_policy
            .storage_key(&account.id, &upload.file_name, now);

        let object = self
            .storage
            .put_object(&key, upload.bytes, &upload.content_type)
            .await?;

        let removed = self
            .files
            .mark_removed(&account.id, FileKind::AccountAvatar)
            .await?;
        if removed > 0 {
            tracing::debug!(account_id = %account.id, removed, "Previous avatars flagged as removed");
        }

        self.files
            .create(StoredFile {
                id: FileId::new(),
                url: object.url.clone(),
                storage_key: object.key,
                mime_type: upload.content_type,
                account_id: account.id,
                kind: FileKind::AccountAvatar,
                is_removed: false,
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.credentials.set_avatar(&account.id, &object.url).await
    }
}
