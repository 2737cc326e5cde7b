use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried in the signed payload of every access token.
///
/// Decoding is strict: a payload missing any field, or carrying one with the
/// wrong JSON type, is rejected rather than defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (numeric user identifier)
    pub sub: u64,

    /// Username of the subject at issuance time
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for user authentication.
    ///
    /// # Arguments
    /// * `user_id` - Numeric user identifier
    /// * `username` - Username
    /// * `issued_at` - Unix timestamp used as `iat`
    /// * `ttl` - Lifetime of the token; zero or negative yields a token that is already expired
    ///
    /// # Returns
    /// Claims with sub, username, iat, and exp set
    pub fn for_user(
        user_id: u64,
        username: impl Into<String>,
        issued_at: i64,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id,
            username: username.into(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl.num_seconds()),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at the exact second of its expiration.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(7, "alice", 1_700_000_000, Duration::hours(24));

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60); // 24 hours
    }

    #[test]
    fn test_negative_ttl_expires_before_issuance() {
        let claims = Claims::for_user(1, "bob", 1000, Duration::seconds(-1));

        assert_eq!(claims.exp, 999);
        assert!(claims.is_expired(1000));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::for_user(1, "bob", 0, Duration::seconds(1000));

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }

    #[test]
    fn test_wire_field_names() {
        let claims = Claims::for_user(42, "carol", 10, Duration::seconds(5));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "sub": 42, "username": "carol", "iat": 10, "exp": 15 })
        );
    }

    #[test]
    fn test_decoding_fails_closed() {
        let missing_username = serde_json::json!({ "sub": 1, "iat": 0, "exp": 10 });
        assert!(serde_json::from_value::<Claims>(missing_username).is_err());

        let string_subject = serde_json::json!({ "sub": "1", "username": "x", "iat": 0, "exp": 10 });
        assert!(serde_json::from_value::<Claims>(string_subject).is_err());

        let negative_subject = serde_json::json!({ "sub": -1, "username": "x", "iat": 0, "exp": 10 });
        assert!(serde_json::from_value::<Claims>(negative_subject).is_err());
    }
}
