use thiserror::Error;

/// Error type for JWT operations.
///
/// `TokenExpired` and `InvalidToken` are kept apart for logging; callers
/// facing end users should collapse both into a single "invalid" answer.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
