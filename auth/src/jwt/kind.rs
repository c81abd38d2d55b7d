use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Purpose of a token. Each kind is signed with its own secret and lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short lived, presented on every API call.
    Access,
    /// Long lived, exchanged for a fresh access token.
    Refresh,
    /// Mailed on signup to confirm ownership of the address.
    EmailConfirmation,
    /// Mailed on request to allow setting a new password.
    PasswordReset,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Access,
        TokenKind::Refresh,
        TokenKind::EmailConfirmation,
        TokenKind::PasswordReset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::EmailConfirmation => "email_confirmation",
            TokenKind::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
