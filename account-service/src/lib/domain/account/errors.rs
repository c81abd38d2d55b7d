use auth::TokenKind;
use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for AccountName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for ContactNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactNumberError {
    #[error("Invalid contact number: {0}")]
    InvalidFormat(String),
}

/// Error for Address validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Address too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters")]
    TooShort { min: usize },

    #[error("Password must contain at least one digit, one uppercase and one lowercase letter")]
    MissingCharacterClass,

    #[error("Password contains characters that are not allowed")]
    InvalidCharacters,
}

/// Error for avatar upload validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Image is required in FormData")]
    MissingFile,

    #[error("This image format is not supported")]
    UnsupportedMediaType(String),

    #[error("Image should be less then {limit_mb} MB")]
    TooLarge { limit_mb: u64 },
}

/// Error for mail delivery
#[derive(Debug, Clone, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    Address(String),

    #[error("Failed to build mail: {0}")]
    Build(String),

    #[error("Mail transport failed: {0}")]
    Transport(String),
}

/// Error for object storage operations
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Object upload failed: {0}")]
    UploadFailed(String),
}

/// Top-level error for all account-related operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("{0}")]
    InvalidContactNumber(#[from] ContactNumberError),

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("{0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("{0}")]
    InvalidUpload(#[from] UploadError),

    // Workflow validation errors
    #[error("Confirm password should match with {0}")]
    PasswordConfirmationMismatch(&'static str),

    #[error("New password should not match with old password")]
    PasswordUnchanged,

    // Credential and token errors
    #[error("No email found")]
    EmailNotRegistered(String),

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Incorrect password")]
    IncorrectOldPassword,

    #[error("Sorry, this email is not associated with us.")]
    EmailNotAssociated(String),

    #[error("{}", invalid_token_message(.0))]
    InvalidToken(TokenKind),

    // Domain-level errors
    #[error("No user found.")]
    NotFound(String),

    #[error("email already exists")]
    EmailAlreadyExists(String),

    #[error("Account is already verified.")]
    AlreadyVerified,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Password(String),

    #[error("Token generation failed: {0}")]
    TokenIssue(String),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AccountError {
    /// Request field the error refers to, when there is one.
    pub fn field_name(&self) -> Option<&'static str> {
        match self {
            AccountError::InvalidEmail(_)
            | AccountError::EmailNotRegistered(_)
            | AccountError::EmailNotAssociated(_)
            | AccountError::EmailAlreadyExists(_) => Some("email"),
            AccountError::InvalidName(_) => Some("name"),
            AccountError::InvalidContactNumber(_) => Some("contactNo"),
            AccountError::InvalidAddress(_) => Some("address"),
            AccountError::InvalidRole(_) => Some("role"),
            AccountError::InvalidPassword(_) | AccountError::IncorrectPassword => Some("password"),
            AccountError::IncorrectOldPassword => Some("oldPassword"),
            AccountError::PasswordUnchanged => Some("newPassword"),
            AccountError::PasswordConfirmationMismatch(_) => Some("confirmPassword"),
            AccountError::InvalidUpload(UploadError::MissingFile) => None,
            AccountError::InvalidUpload(_) => Some("file"),
            _ => None,
        }
    }
}

fn invalid_token_message(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Access => "Invalid access token",
        TokenKind::Refresh => "Invalid refresh token",
        TokenKind::EmailConfirmation => "Invalid confirmation token",
        TokenKind::PasswordReset => "Invalid password reset token",
    }
}

impl From<auth::PasswordError> for AccountError {
    fn from(err: auth::PasswordError) -> Self {
        AccountError::Password(err.to_string())
    }
}
