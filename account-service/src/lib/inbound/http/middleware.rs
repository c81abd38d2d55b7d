use auth::TokenKind;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::inbound::http::router::AppState;

const BEARER_REQUIRED: &str = "Bearer token required in header";
const INVALID_ACCESS_TOKEN: &str = "Invalid access token";
const UNKNOWN_ACCOUNT: &str = "Invalid access token with Wrong account credentials";

/// Account resolved from the access token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account: Account,
}

/// Middleware that validates the access token and attaches the account to the request.
///
/// Performs one account lookup per request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims: auth::Claims = state
        .authenticator
        .validate_token(TokenKind::Access, token)
        .map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            ApiError::forbidden(INVALID_ACCESS_TOKEN)
        })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Malformed subject in access token");
        ApiError::forbidden(INVALID_ACCESS_TOKEN)
    })?;

    let account = state
        .account_service
        .get_account(&account_id)
        .await
        .map_err(|e| match e {
            AccountError::NotFound(_) => {
                tracing::warn!(account_id = %account_id, "Access token for unknown account");
                ApiError::forbidden(UNKNOWN_ACCOUNT)
            }
            other => ApiError::from(other),
        })?;

    req.extensions_mut().insert(AuthenticatedAccount { account });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::bad_request(BEARER_REQUIRED))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::forbidden(INVALID_ACCESS_TOKEN))?;

    parse_bearer(auth_str).ok_or_else(|| ApiError::forbidden(INVALID_ACCESS_TOKEN))
}

/// Token part of a `Bearer <token>` header value; the scheme is case-insensitive.
fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
