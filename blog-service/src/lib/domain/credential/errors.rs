use auth::AuthenticationError;
use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::domain::credential::models::UserId;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Top-level error for credential operations
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    // Input validation errors
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Password must not be empty")]
    EmptyPassword,

    // Domain-level errors
    /// Unknown user id and wrong password are deliberately the same error.
    #[error("Invalid user id or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Not allowed to act on user {0}")]
    Forbidden(UserId),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    // Infrastructure errors
    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl CredentialError {
    /// Stable error code reported to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            CredentialError::InvalidUsername(_) => "InvalidUsername",
            CredentialError::EmptyPassword => "InvalidPassword",
            CredentialError::InvalidCredentials => "CredentialMismatch",
            CredentialError::NotFound(_) => "NotFound",
            CredentialError::Forbidden(_) => "Forbidden",
            CredentialError::UsernameAlreadyExists(_) => "UsernameTaken",
            CredentialError::Password(e) => e.code(),
            CredentialError::Token(e) => e.code(),
            CredentialError::StoreUnavailable(_) => "StoreUnavailable",
            CredentialError::Unknown(_) => "Internal",
        }
    }
}

impl From<AuthenticationError> for CredentialError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => CredentialError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => CredentialError::Password(e),
            AuthenticationError::JwtError(e) => CredentialError::Token(e),
        }
    }
}

impl From<anyhow::Error> for CredentialError {
    fn from(err: anyhow::Error) -> Self {
        CredentialError::Unknown(err.to_string())
    }
}
