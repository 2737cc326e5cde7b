use async_trait::async_trait;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::ChangePasswordCommand;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::models::LoginOutcome;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::StoredCredential;
use crate::domain::credential::models::UserId;
use crate::domain::credential::models::Username;

/// Port for credential domain service operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new user, storing only the password hash.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Stored credential record
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Hashing failed
    /// * `StoreUnavailable` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<StoredCredential, CredentialError>;

    /// Verify a user's password and issue an access token.
    ///
    /// # Arguments
    /// * `command` - User id and plaintext password
    ///
    /// # Returns
    /// Signed token with its expiry and the user's identity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user id or wrong password (indistinguishable)
    /// * `Password` - Stored hash is malformed
    /// * `Token` - Token signing failed
    /// * `StoreUnavailable` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, CredentialError>;

    /// Retrieve a user's credential record by id.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `StoreUnavailable` - Store operation failed
    async fn get_user(&self, id: UserId) -> Result<StoredCredential, CredentialError>;

    /// Replace a user's password with a freshly salted hash.
    ///
    /// # Errors
    /// * `EmptyPassword` - New password is empty
    /// * `NotFound` - User does not exist
    /// * `Password` - Hashing failed
    /// * `StoreUnavailable` - Store operation failed
    async fn change_password(
        &self,
        command: ChangePasswordCommand,
    ) -> Result<StoredCredential, CredentialError>;

    /// Delete a user account. Only the account owner may delete it.
    ///
    /// # Arguments
    /// * `requester` - Authenticated caller
    /// * `id` - Account to delete
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not the account owner
    /// * `NotFound` - User does not exist
    /// * `StoreUnavailable` - Store operation failed
    async fn delete_user(&self, requester: UserId, id: UserId) -> Result<(), CredentialError>;
}

/// Credential persistence, owned by an external collaborator.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve the stored credential for a user.
    ///
    /// # Returns
    /// Optional credential (None if no such user)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Backend failure
    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredCredential>, CredentialError>;

    /// Persist a new user with an already hashed password.
    ///
    /// # Returns
    /// Stored credential with its assigned id
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `StoreUnavailable` - Backend failure
    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<StoredCredential, CredentialError>;

    /// Overwrite the stored hash of an existing user.
    ///
    /// # Returns
    /// Updated credential (None if no such user)
    async fn update_hash(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<Option<StoredCredential>, CredentialError>;

    /// Remove a user.
    ///
    /// # Returns
    /// Whether a record was deleted
    async fn delete(&self, id: UserId) -> Result<bool, CredentialError>;
}
