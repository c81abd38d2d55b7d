use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenPolicy;
use chrono::Duration;
use chrono::Utc;
use mockall::mock;

use crate::account::errors::AccountError;
use crate::account::errors::MailError;
use crate::account::errors::StorageError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountName;
use crate::account::models::ContactNumber;
use crate::account::models::EmailAddress;
use crate::account::models::FileKind;
use crate::account::models::HashedPassword;
use crate::account::models::Role;
use crate::account::models::StoredFile;
use crate::account::models::StoredObject;
use crate::account::models::UpdateBasicInfoCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::FileRepository;
use crate::account::ports::MailRecipient;
use crate::account::ports::Mailer;
use crate::account::ports::ObjectStorage;

mock! {
    pub TestAccountRepository {}

    #[async_trait]
    impl AccountRepository for TestAccountRepository {
        async fn create(&self, account: Account) -> Result<Account, AccountError>;
        async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
        async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
        async fn list_all(&self) -> Result<Vec<Account>, AccountError>;
        async fn update_password(&self, id: &AccountId, password_hash: &HashedPassword) -> Result<(), AccountError>;
        async fn update_basic_info(&self, id: &AccountId, command: &UpdateBasicInfoCommand) -> Result<Account, AccountError>;
        async fn set_avatar(&self, id: &AccountId, avatar_url: &str) -> Result<Account, AccountError>;
        async fn mark_verified(&self, id: &AccountId) -> Result<bool, AccountError>;
    }
}

mock! {
    pub TestFileRepository {}

    #[async_trait]
    impl FileRepository for TestFileRepository {
        async fn create(&self, file: StoredFile) -> Result<StoredFile, AccountError>;
        async fn mark_removed(&self, account_id: &AccountId, kind: FileKind) -> Result<u64, AccountError>;
    }
}

mock! {
    pub TestMailer {}

    #[async_trait]
    impl Mailer for TestMailer {
        async fn send_account_confirmation(&self, recipient: &MailRecipient, token: &str) -> Result<(), MailError>;
        async fn send_password_reset(&self, recipient: &MailRecipient, token: &str) -> Result<(), MailError>;
    }
}

mock! {
    pub TestObjectStorage {}

    #[async_trait]
    impl ObjectStorage for TestObjectStorage {
        async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<StoredObject, StorageError>;
    }
}

/// Authenticator with the cheapest Argon2 cost and distinct secrets per kind.
pub fn test_authenticator() -> Arc<Authenticator> {
    let ttl = Duration::minutes(15);
    let tokens = TokenIssuer::new(
        TokenPolicy::new(b"access-secret", ttl),
        TokenPolicy::new(b"refresh-secret", ttl),
        TokenPolicy::new(b"confirmation-secret", ttl),
        TokenPolicy::new(b"reset-secret", ttl),
    );

    Arc::new(Authenticator::new(
        PasswordHasher::with_cost(1024, 1, 1).unwrap(),
        tokens,
    ))
}

/// Unverified account whose stored hash matches `password`.
pub fn test_account(authenticator: &Authenticator, email: &str, password: &str) -> Account {
    let now = Utc::now();

    Account {
        id: AccountId::new(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: HashedPassword::from_hash(authenticator.hash_password(password).unwrap()),
        name: AccountName::new("A B".to_string()).unwrap(),
        contact_no: ContactNumber::new("+8801911111111".to_string()).unwrap(),
        role: Role::User,
        is_verified: false,
        avatar: None,
        address: None,
        created_at: now,
        updated_at: now,
    }
}
