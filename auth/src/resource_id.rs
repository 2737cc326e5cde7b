use std::fmt;

use thiserror::Error;

/// Error for path identifier parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("id must be a base-10 integer, got {0:?}")]
    NotAnInteger(String),

    #[error("id must be greater than zero, got {0}")]
    NotPositive(i64),
}

impl ParamError {
    /// Stable error code reported to API clients.
    pub fn code(&self) -> &'static str {
        "ParamInvalid"
    }
}

/// Positive integer identifier taken from a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Parse a path segment into a positive identifier.
    ///
    /// # Errors
    /// * `NotAnInteger` - Segment is empty, non-numeric, or out of range
    /// * `NotPositive` - Value is zero or negative
    pub fn parse(segment: &str) -> Result<Self, ParamError> {
        let value: i64 = segment
            .parse()
            .map_err(|_| ParamError::NotAnInteger(segment.to_string()))?;

        if value <= 0 {
            return Err(ParamError::NotPositive(value));
        }

        Ok(Self(value.unsigned_abs()))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
