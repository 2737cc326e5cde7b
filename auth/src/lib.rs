//! Authentication utilities library
//!
//! Provides the authentication core shared by the blog services:
//! - Password hashing (Argon2id)
//! - JWT issuance and validation pinned to HS256
//! - Bearer header parsing and request identity
//! - Positive path identifier parsing
//!
//! Nothing here performs I/O; callers feed in header values, stored hashes
//! and path segments and decide how to respond to the typed errors.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", &hash, 7, "alice", Duration::hours(24))
//!     .unwrap();
//!
//! // Protected request: authorize from the Authorization header
//! let header = format!("Bearer {}", result.access_token);
//! let context = auth.authorize(Some(&header)).unwrap();
//! assert_eq!(context.user_id, 7);
//! ```

pub mod authenticator;
pub mod bearer;
pub mod context;
pub mod jwt;
pub mod password;
pub mod resource_id;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use bearer::AuthorizationError;
pub use context::AuthContext;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use resource_id::ParamError;
pub use resource_id::ResourceId;
