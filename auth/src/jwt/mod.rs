pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;
pub mod kind;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use issuer::TokenPolicy;
pub use kind::TokenKind;
