use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::JwtError;

/// The only algorithm tokens are issued with or accepted under.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT token handler for issuing and validating access tokens.
///
/// Keys are derived from the secret once at construction and never change,
/// so a single handler can be shared by reference across all requests.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is checked against the caller's clock in `validate_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(TOKEN_ALGORITHM);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue a token for a user, valid for `ttl` from now.
    pub fn issue(&self, user_id: u64, username: &str, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(user_id, username, ttl, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// Identical inputs produce byte-identical tokens.
    pub fn issue_at(
        &self,
        user_id: u64,
        username: &str,
        ttl: Duration,
        now: i64,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::for_user(user_id, username, now, ttl))
    }

    /// Validate a token against the current time.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token as if the current time were `now`.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// token shape, declared algorithm, signature, claims decoding, expiry.
    ///
    /// # Errors
    /// * `MalformedToken` - Not three base64url segments, or header/claims are not the expected JSON
    /// * `UnsupportedAlgorithm` - Header declares anything other than HS256
    /// * `InvalidSignature` - Signature does not match header and payload
    /// * `Expired` - `now` is past the `exp` claim
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let algorithm = declared_algorithm(token)?;
        if algorithm.parse::<Algorithm>().ok() != Some(TOKEN_ALGORITHM) {
            return Err(JwtError::UnsupportedAlgorithm(algorithm));
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => JwtError::UnsupportedAlgorithm(algorithm.clone()),
                _ => JwtError::MalformedToken(e.to_string()),
            })?;

        if token_data.claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }
}

/// Split the token into its three segments and read `alg` from the header
/// without trusting anything else in it.
fn declared_algorithm(token: &str) -> Result<String, JwtError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(JwtError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| JwtError::MalformedToken(format!("header is not base64url: {}", e)))?;
    URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| JwtError::MalformedToken(format!("payload is not base64url: {}", e)))?;
    URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|e| JwtError::MalformedToken(format!("signature is not base64url: {}", e)))?;

    serde_json::from_slice::<RawHeader>(&header)
        .map(|raw| raw.alg)
        .map_err(|e| JwtError::MalformedToken(format!("header is not valid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";
    const T0: i64 = 1_700_000_000;

    fn b64(value: &serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    fn payload() -> serde_json::Value {
        serde_json::json!({ "sub": 7, "username": "alice", "iat": T0, "exp": T0 + 3600 })
    }

    #[test]
    fn test_issue_and_validate() {
        let handler = JwtHandler::new(SECRET);

        let token = handler
            .issue_at(7, "alice", Duration::seconds(3600), T0)
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let claims = handler.validate_at(&token, T0).expect("Failed to validate token");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, T0 + 3600);
    }

    #[test]
    fn test_issue_with_wall_clock() {
        let handler = JwtHandler::new(SECRET);

        let token = handler.issue(7, "alice", Duration::hours(1)).unwrap();
        let claims = handler.validate(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_issue_is_deterministic() {
        let handler = JwtHandler::new(SECRET);

        let first = handler.issue_at(1, "bob", Duration::seconds(60), T0).unwrap();
        let second = handler.issue_at(1, "bob", Duration::seconds(60), T0).unwrap();
        let later = handler.issue_at(1, "bob", Duration::seconds(60), T0 + 1).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, later);
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        let handler = JwtHandler::new(SECRET);

        let token = handler.issue_at(1, "bob", Duration::seconds(-1), T0).unwrap();

        assert_eq!(handler.validate_at(&token, T0), Err(JwtError::Expired));
        assert_eq!(handler.validate(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_expiry_boundary() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at(1, "bob", Duration::seconds(86400), T0).unwrap();

        assert!(handler.validate_at(&token, T0 + 86399).is_ok());
        assert!(handler.validate_at(&token, T0 + 86400).is_ok());
        assert_eq!(handler.validate_at(&token, T0 + 86401), Err(JwtError::Expired));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1.issue_at(1, "bob", Duration::seconds(60), T0).unwrap();

        assert_eq!(handler2.validate_at(&token, T0), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at(7, "alice", Duration::seconds(60), T0).unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        let mut forged = payload();
        forged["sub"] = serde_json::json!(1);
        let tampered = format!("{}.{}.{}", segments[0], b64(&forged), segments[2]);

        assert_eq!(handler.validate_at(&tampered, T0), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let handler = JwtHandler::new(SECRET);
        let header = serde_json::json!({ "alg": "none", "typ": "JWT" });
        let token = format!("{}.{}.", b64(&header), b64(&payload()));

        assert_eq!(
            handler.validate_at(&token, T0),
            Err(JwtError::UnsupportedAlgorithm("none".to_string()))
        );
    }

    #[test]
    fn test_other_hmac_algorithm_is_rejected() {
        let handler = JwtHandler::new(SECRET);

        // Correctly signed with the same secret, but under HS512
        let claims = Claims::for_user(7, "alice", T0, Duration::seconds(60));
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(
            handler.validate_at(&token, T0),
            Err(JwtError::UnsupportedAlgorithm("HS512".to_string()))
        );
    }

    #[test]
    fn test_unknown_algorithm_is_rejected_before_signature() {
        let handler = JwtHandler::new(SECRET);
        let header = serde_json::json!({ "alg": "RS256", "typ": "JWT" });
        let token = format!("{}.{}.c2lnbmF0dXJl", b64(&header), b64(&payload()));

        assert_eq!(
            handler.validate_at(&token, T0),
            Err(JwtError::UnsupportedAlgorithm("RS256".to_string()))
        );
    }

    #[test]
    fn test_accepted_algorithm_follows_issued_header() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.issue_at(7, "alice", Duration::seconds(60), T0).unwrap();

        let declared = declared_algorithm(&token).unwrap();
        assert_eq!(serde_json::json!(declared), serde_json::to_value(TOKEN_ALGORITHM).unwrap());
        assert!(handler.validate_at(&token, T0).is_ok());

        // Algorithm names are case-sensitive
        let header = serde_json::json!({ "alg": "hs256", "typ": "JWT" });
        let lowercase = format!("{}.{}.c2lnbmF0dXJl", b64(&header), b64(&payload()));
        assert_eq!(
            handler.validate_at(&lowercase, T0),
            Err(JwtError::UnsupportedAlgorithm("hs256".to_string()))
        );
    }

    #[test]
    fn test_malformed_tokens() {
        let handler = JwtHandler::new(SECRET);
        let header = b64(&serde_json::json!({ "alg": "HS256", "typ": "JWT" }));

        let cases = [
            String::new(),
            "invalid".to_string(),
            "invalid.token".to_string(),
            "a.b.c.d".to_string(),
            "invalid.token.here".to_string(),
            format!("{}.{}.sig!", header, b64(&payload())),
            format!("{}.{}.", b64(&serde_json::json!("not an object")), b64(&payload())),
            format!("{}.{}.", b64(&serde_json::json!({ "typ": "JWT" })), b64(&payload())),
        ];

        for token in cases {
            assert!(
                matches!(handler.validate_at(&token, T0), Err(JwtError::MalformedToken(_))),
                "{token:?}"
            );
        }
    }

    #[test]
    fn test_signed_payload_with_wrong_shape_fails_closed() {
        let handler = JwtHandler::new(SECRET);
        let key = EncodingKey::from_secret(SECRET);
        let header = Header::new(TOKEN_ALGORITHM);

        let missing_username = serde_json::json!({ "sub": 7, "iat": T0, "exp": T0 + 60 });
        let token = encode(&header, &missing_username, &key).unwrap();
        assert!(matches!(
            handler.validate_at(&token, T0),
            Err(JwtError::MalformedToken(_))
        ));

        let string_subject =
            serde_json::json!({ "sub": "7", "username": "alice", "iat": T0, "exp": T0 + 60 });
        let token = encode(&header, &string_subject, &key).unwrap();
        assert!(matches!(
            handler.validate_at(&token, T0),
            Err(JwtError::MalformedToken(_))
        ));
    }
}
