use std::fmt;
use std::str::FromStr;

use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::AddressError;
use crate::account::errors::ContactNumberError;
use crate::account::errors::EmailError;
use crate::account::errors::NameError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::RoleError;
use crate::account::errors::UploadError;

/// Account aggregate entity.
///
/// The password is only ever held as a [`HashedPassword`].
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: HashedPassword,
    pub name: AccountName,
    pub contact_no: ContactNumber,
    pub role: Role,
    pub is_verified: bool,
    pub avatar: Option<String>,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Trimmed and lowercased, then validated with an RFC 5322 compliant parser.
/// Two addresses differing only in case are the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new normalized email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name, 2-32 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 32;

    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Bangladeshi mobile number: optional `+88` prefix, then `01[1-9]` and 8 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNumber(String);

impl ContactNumber {
    const COUNTRY_PREFIX: &'static str = "+88";

    pub fn new(number: String) -> Result<Self, ContactNumberError> {
        let number = number.trim().to_string();
        let local = number.strip_prefix(Self::COUNTRY_PREFIX).unwrap_or(&number);
        let bytes = local.as_bytes();

        let valid = bytes.len() == 11
            && bytes.starts_with(b"01")
            && (b'1'..=b'9').contains(&bytes[2])
            && bytes[3..].iter().all(u8::is_ascii_digit);

        if valid {
            Ok(Self(number))
        } else {
            Err(ContactNumberError::InvalidFormat(number))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Postal address, 2-350 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 350;

    pub fn new(address: String) -> Result<Self, AddressError> {
        let address = address.trim().to_string();
        let length = address.chars().count();

        if length < Self::MIN_LENGTH {
            Err(AddressError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(AddressError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(address))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// A password hash in PHC string format.
///
/// Produced by the credential store's hashing step or loaded from storage;
/// there is no way to build one from a plaintext password directly.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a hash read back from storage.
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}

/// A plaintext password that satisfies the password policy.
///
/// At least 8 characters with a digit, an uppercase and a lowercase letter,
/// drawn from ASCII letters, digits and common punctuation.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    const MIN_LENGTH: usize = 8;
    const ALLOWED_SYMBOLS: &'static str = "_!@#$%^&*,.;:'\"=+?`~<>()|/-";

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let password = password.trim().to_string();

        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if !password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || Self::ALLOWED_SYMBOLS.contains(c))
        {
            return Err(PasswordPolicyError::InvalidCharacters);
        }

        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        if !(has_digit && has_upper && has_lower) {
            return Err(PasswordPolicyError::MissingCharacterClass);
        }

        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(<redacted>)")
    }
}

/// Command to create a new account with domain types
#[derive(Debug)]
pub struct CreateAccountCommand {
    pub email: EmailAddress,
    pub name: AccountName,
    pub contact_no: ContactNumber,
    pub password: PlainPassword,
}

impl CreateAccountCommand {
    /// Construct a new create account command.
    ///
    /// # Arguments
    /// * `password` - Plain text password (hashed by the credential store)
    pub fn new(
        email: EmailAddress,
        name: AccountName,
        contact_no: ContactNumber,
        password: PlainPassword,
    ) -> Self {
        Self {
            email,
            name,
            contact_no,
            password,
        }
    }
}

/// Email and password presented at signin.
///
/// The password is not checked against the policy: it is only compared
/// with the stored hash.
#[derive(Debug)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub old_password: String,
    pub new_password: PlainPassword,
    pub confirm_password: String,
}

#[derive(Debug)]
pub struct ResetPasswordCommand {
    pub new_password: PlainPassword,
    pub confirm_password: String,
}

/// Command to replace the editable profile fields.
#[derive(Debug, Clone)]
pub struct UpdateBasicInfoCommand {
    pub name: AccountName,
    pub contact_no: ContactNumber,
    pub address: Address,
}

/// Account together with a freshly issued access/refresh pair.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub tokens: TokenPair,
}

/// File identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    AccountAvatar,
    ServiceLogo,
    ServiceImages,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::AccountAvatar => "account-avatar",
            FileKind::ServiceLogo => "service-logo",
            FileKind::ServiceImages => "service-images",
        }
    }
}

impl FromStr for FileKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account-avatar" => Ok(FileKind::AccountAvatar),
            "service-logo" => Ok(FileKind::ServiceLogo),
            "service-images" => Ok(FileKind::ServiceImages),
            other => Err(format!("Unknown file kind: {}", other)),
        }
    }
}

/// Metadata of an uploaded object. Immutable apart from `is_removed`.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: FileId,
    pub url: String,
    pub storage_key: String,
    pub mime_type: String,
    pub account_id: AccountId,
    pub kind: FileKind,
    pub is_removed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Location of an object after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

/// Raw avatar image received from the client.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Acceptance rules for avatar images.
#[derive(Debug, Clone, Copy)]
pub struct AvatarPolicy {
    pub max_bytes: u64,
}

impl AvatarPolicy {
    pub const ALLOWED_MIME_TYPES: [&'static str; 4] =
        ["image/png", "image/gif", "image/jpeg", "image/jpg"];

    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Check mime type and size before anything is sent to storage.
    pub fn validate(&self, upload: &AvatarUpload) -> Result<(), UploadError> {
        if !Self::ALLOWED_MIME_TYPES.contains(&upload.content_type.as_str()) {
            return Err(UploadError::UnsupportedMediaType(upload.content_type.clone()));
        }

        if upload.bytes.len() as u64 > self.max_bytes {
            return Err(UploadError::TooLarge {
                limit_mb: (self.max_bytes / (1024 * 1024)).max(1),
            });
        }

        Ok(())
    }

    /// Storage key `avatar/{account}/{unix_millis}{.ext}`.
    pub fn storage_key(
        &self,
        account_id: &AccountId,
        file_name: &str,
        now: DateTime<Utc>,
    ) -> String {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        format!(
            "avatar/{}/{}{}",
            account_id,
            now.timestamp_millis(),
            extension
        )
    }
}

impl Default for AvatarPolicy {
    fn default() -> Self {
        Self::new(1024 * 1024)
    }
}
