use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}

impl PasswordError {
    /// Stable error code reported to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            PasswordError::HashingFailed(_) => "HashingFailure",
            PasswordError::MalformedHash(_) => "MalformedHash",
        }
    }
}
