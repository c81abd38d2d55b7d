use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;
use super::kind::TokenKind;

/// Signing secret and lifetime for one token kind.
pub struct TokenPolicy {
    handler: JwtHandler,
    ttl: Duration,
}

impl TokenPolicy {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Issues and verifies the four token kinds.
///
/// Every kind has an independent secret and TTL. Verification also checks the
/// `kind` claim, so a refresh token is never accepted where an access token is
/// expected even when both secrets happen to be equal.
pub struct TokenIssuer {
    access: TokenPolicy,
    refresh: TokenPolicy,
    email_confirmation: TokenPolicy,
    password_reset: TokenPolicy,
}

/// Access and refresh token issued together on signup, signin and refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenIssuer {
    pub fn new(
        access: TokenPolicy,
        refresh: TokenPolicy,
        email_confirmation: TokenPolicy,
        password_reset: TokenPolicy,
    ) -> Self {
        Self {
            access,
            refresh,
            email_confirmation,
            password_reset,
        }
    }

    pub fn policy(&self, kind: TokenKind) -> &TokenPolicy {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
            TokenKind::EmailConfirmation => &self.email_confirmation,
            TokenKind::PasswordReset => &self.password_reset,
        }
    }

    /// Issue a token of `kind` for the given subject, expiring after the kind's TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: impl ToString,
        email: &str,
    ) -> Result<String, JwtError> {
        let claims = Claims::issued_at(kind, subject, email, Utc::now(), self.policy(kind).ttl);
        self.sign(&claims)
    }

    /// Sign prepared claims with the secret of `claims.kind`.
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        self.policy(claims.kind).handler.encode(claims)
    }

    /// Verify a token of `kind` and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `InvalidToken` - Bad signature, malformed token or a different kind
    pub fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = self.policy(kind).handler.decode(token)?;

        if claims.kind != kind {
            return Err(JwtError::InvalidToken(format!(
                "expected {} token, got {}",
                kind, claims.kind
            )));
        }

        Ok(claims)
    }

    /// Issue an access + refresh pair for the subject.
    pub fn issue_pair(&self, subject: impl ToString, email: &str) -> Result<TokenPair, JwtError> {
        let subject = subject.to_string();

        Ok(TokenPair {
            access_token: self.issue(TokenKind::Access, &subject, email)?,
            refresh_token: self.issue(TokenKind::Refresh, &subject, email)?,
        })
    }
}
