use thiserror::Error;

use crate::jwt::JwtError;

const BEARER_SCHEME: &str = "Bearer";

/// Reasons a request fails authorization before reaching a handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Authorization header is required")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error(transparent)]
    Token(#[from] JwtError),
}

impl AuthorizationError {
    /// Stable error code reported to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            AuthorizationError::MissingHeader => "MissingHeader",
            AuthorizationError::MalformedHeader => "MalformedHeader",
            AuthorizationError::Token(e) => e.code(),
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// The value must be exactly the case-sensitive keyword `Bearer`, one space,
/// and a non-empty token. An empty header counts as missing.
///
/// # Errors
/// * `MissingHeader` - No header, or an empty one
/// * `MalformedHeader` - Any other shape
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthorizationError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthorizationError::MissingHeader),
    };

    match header.split(' ').collect::<Vec<_>>().as_slice() {
        [BEARER_SCHEME, token] if !token.is_empty() => Ok(*token),
        _ => Err(AuthorizationError::MalformedHeader),
    }
}
