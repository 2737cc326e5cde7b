use chrono::Duration;
use chrono::Utc;

use crate::bearer::extract_bearer_token;
use crate::bearer::AuthorizationError;
use crate::context::AuthContext;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Built once at startup from the signing secret and shared read-only by
/// every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Claims signed into the token
    pub claims: Claims,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default password work factor.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Replace the password hasher (e.g. to apply a configured work factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a recognized encoding
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token valid for `ttl` from now.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be verified
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: u64,
        username: &str,
        ttl: Duration,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        self.authenticate_at(password, stored_hash, user_id, username, ttl, Utc::now().timestamp())
    }

    /// Same as [`Authenticator::authenticate`] with an explicit issuance time.
    pub fn authenticate_at(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: u64,
        username: &str,
        ttl: Duration,
        now: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = Claims::for_user(user_id, username, now, ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            claims,
        })
    }

    /// Generate JWT token without password verification.
    pub fn generate_token(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate and decode a JWT token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.validate(token)
    }

    /// Authorize a request from its raw `Authorization` header value.
    pub fn authorize(&self, header: Option<&str>) -> Result<AuthContext, AuthorizationError> {
        self.authorize_at(header, Utc::now().timestamp())
    }

    /// Authorize a request as if the current time were `now`.
    ///
    /// # Errors
    /// * `MissingHeader` / `MalformedHeader` - Header absent or not `Bearer <token>`
    /// * `Token` - Token rejected by [`JwtHandler::validate_at`]
    pub fn authorize_at(
        &self,
        header: Option<&str>,
        now: i64,
    ) -> Result<AuthContext, AuthorizationError> {
        let token = extract_bearer_token(header)?;
        let claims = self.jwt_handler.validate_at(token, now)?;

        Ok(AuthContext::from(claims))
    }
}
