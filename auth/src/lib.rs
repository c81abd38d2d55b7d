//! Authentication utilities library
//!
//! Provides the credential and token core of the account service:
//! - Password hashing (Argon2id) with a configurable cost
//! - Issuing and verifying four kinds of signed, self-expiring tokens
//!   (access, refresh, email confirmation, password reset)
//! - Authentication coordination
//!
//! Tokens are stateless: validity is decided by signature, kind and expiry only.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenIssuer, TokenKind, TokenPolicy};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(
//!     TokenPolicy::new(b"access_secret_at_least_32_bytes_long!", Duration::minutes(15)),
//!     TokenPolicy::new(b"refresh_secret_at_least_32_bytes_long", Duration::days(7)),
//!     TokenPolicy::new(b"confirm_secret_at_least_32_bytes_long", Duration::days(1)),
//!     TokenPolicy::new(b"reset_secret_at_least_32_bytes_long!!", Duration::hours(1)),
//! );
//!
//! let token = issuer.issue(TokenKind::Access, "account-1", "a@b.com").unwrap();
//! let claims = issuer.verify(TokenKind::Access, &token).unwrap();
//! assert_eq!(claims.sub, "account-1");
//!
//! // A token is only valid for the purpose it was issued for.
//! assert!(issuer.verify(TokenKind::Refresh, &token).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIssuer;
pub use jwt::TokenKind;
pub use jwt::TokenPair;
pub use jwt::TokenPolicy;
pub use password::PasswordError;
pub use password::PasswordHasher;
