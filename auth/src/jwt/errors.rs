use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,
}

impl JwtError {
    /// Stable error code reported to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            JwtError::EncodingFailed(_) => "TokenEncodingFailure",
            JwtError::MalformedToken(_) => "MalformedToken",
            JwtError::UnsupportedAlgorithm(_) => "UnsupportedAlgorithm",
            JwtError::InvalidSignature => "InvalidSignature",
            JwtError::Expired => "Expired",
        }
    }
}
