use std::fmt;

use auth::ResourceId;

use crate::domain::credential::errors::UsernameError;

/// Numeric user identifier, as carried in the `sub` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

impl From<ResourceId> for UserId {
    fn from(id: ResourceId) -> Self {
        Self(id.get())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Credential record as held by the external store.
///
/// `password_hash` is an opaque PHC string; it is only ever compared
/// through the password hasher, never by string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

/// Command to register a new user
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}

/// Command to log in with a user id and plaintext password
#[derive(Debug)]
pub struct LoginCommand {
    pub user_id: UserId,
    pub password: String,
}

impl LoginCommand {
    pub fn new(user_id: UserId, password: String) -> Self {
        Self { user_id, password }
    }
}

/// Command to replace the authenticated user's password
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    pub password: String,
}

impl ChangePasswordCommand {
    pub fn new(user_id: UserId, password: String) -> Self {
        Self { user_id, password }
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub access_token: String,
    pub expires_at: i64,
    pub user_id: UserId,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_accepts_valid() {
        let username = Username::new("alice_01-x".to_string()).unwrap();
        assert_eq!(username.as_str(), "alice_01-x");
    }

    #[test]
    fn test_username_length_bounds() {
        assert_eq!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong { max: 32, actual: 33 })
        );
    }

    #[test]
    fn test_username_rejects_invalid_characters() {
        assert_eq!(
            Username::new("alice smith".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_user_id_from_resource_id() {
        let id = ResourceId::parse("42").unwrap();
        assert_eq!(UserId::from(id), UserId(42));
    }
}
