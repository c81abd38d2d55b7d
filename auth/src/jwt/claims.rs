use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::kind::TokenKind;

/// Claims carried by every token: who it is for and until when it holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Account email at the time of issue
    pub email: String,

    /// Purpose the token was issued for
    pub kind: TokenKind,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims issued now and expiring after `ttl`.
    pub fn new(
        kind: TokenKind,
        subject: impl ToString,
        email: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self::issued_at(kind, subject, email, Utc::now(), ttl)
    }

    /// Create claims issued at an explicit instant.
    pub fn issued_at(
        kind: TokenKind,
        subject: impl ToString,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            email: email.into(),
            kind,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
