use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenKind;
use crate::jwt::TokenPair;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and token handling.
///
/// Built once at startup from configuration and shared (behind an `Arc`) by
/// every component that hashes passwords or issues and verifies tokens.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl Authenticator {
    pub fn new(password_hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            password_hasher,
            tokens,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a single token of the given kind.
    pub fn issue_token(
        &self,
        kind: TokenKind,
        subject: impl ToString,
        email: &str,
    ) -> Result<String, JwtError> {
        self.tokens.issue(kind, subject, email)
    }

    /// Issue the access + refresh pair handed out on signup, signin and refresh.
    pub fn issue_session(&self, subject: impl ToString, email: &str) -> Result<TokenPair, JwtError> {
        self.tokens.issue_pair(subject, email)
    }

    /// Validate a token of the given kind and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `InvalidToken` - Token is malformed, forged or of another kind
    pub fn validate_token(&self, kind: TokenKind, token: &str) -> Result<Claims, JwtError> {
        self.tokens.verify(kind, token)
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }
}
