use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::ChangePasswordCommand;
use crate::domain::credential::models::LoginCommand;
use crate::domain::credential::models::LoginOutcome;
use crate::domain::credential::models::RegisterCommand;
use crate::domain::credential::models::StoredCredential;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::CredentialServicePort;
use crate::domain::credential::ports::CredentialStore;

/// Verified against when the requested user does not exist, so an unknown id
/// costs the same hashing work as a wrong password.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Domain service implementation for credential operations.
///
/// Hashing and verification are CPU-bound and run on tokio's blocking pool.
pub struct CredentialService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
    dummy_hash: String,
}

impl<CS> CredentialService<CS>
where
    CS: CredentialStore,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential store implementation
    /// * `authenticator` - Shared hasher and token signer
    /// * `token_ttl` - Lifetime of tokens issued at login
    ///
    /// # Errors
    /// * `Password` - The configured work factor cannot be used
    pub fn new(
        store: Arc<CS>,
        authenticator: Arc<Authenticator>,
        token_ttl: Duration,
    ) -> Result<Self, CredentialError> {
        let dummy_hash = authenticator.hash_password(DUMMY_PASSWORD)?;

        Ok(Self {
            store,
            authenticator,
            token_ttl,
            dummy_hash,
        })
    }
}

async fn run_blocking<F, T>(work: F) -> Result<T, CredentialError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| CredentialError::Unknown(format!("Blocking task failed: {}", e)))
}

#[async_trait]
impl<CS> CredentialServicePort for CredentialService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<StoredCredential, CredentialError> {
        if command.password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            run_blocking(move || authenticator.hash_password(&password)).await??;

        let credential = self
            .store
            .create(&command.username, &password_hash)
            .await?;

        tracing::info!(
            user_id = %credential.id,
            username = %credential.username,
            "User registered"
        );

        Ok(credential)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, CredentialError> {
        let user_id = command.user_id;
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let Some(credential) = self.store.find_by_id(user_id).await? else {
            let dummy_hash = self.dummy_hash.clone();
            run_blocking(move || authenticator.verify_password(&password, &dummy_hash)).await??;

            tracing::warn!(user_id = %user_id, "Login failed: unknown user");
            return Err(CredentialError::InvalidCredentials);
        };

        let ttl = self.token_ttl;
        let hash = credential.password_hash.clone();
        let username = credential.username.clone();
        let result = run_blocking(move || {
            authenticator.authenticate(&password, &hash, user_id.0, &username, ttl)
        })
        .await?
        .map_err(|e| {
            let err = CredentialError::from(e);
            if matches!(err, CredentialError::InvalidCredentials) {
                tracing::warn!(user_id = %user_id, "Login failed: wrong password");
            } else {
                tracing::error!(user_id = %user_id, error = %err, "Login failed");
            }
            err
        })?;

        tracing::info!(user_id = %user_id, expires_at = result.claims.exp, "Token issued");

        Ok(LoginOutcome {
            access_token: result.access_token,
            expires_at: result.claims.exp,
            user_id: credential.id,
            username: credential.username,
        })
    }

    async fn get_user(&self, id: UserId) -> Result<StoredCredential, CredentialError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(CredentialError::NotFound(id))
    }

    async fn change_password(
        &self,
        command: ChangePasswordCommand,
    ) -> Result<StoredCredential, CredentialError> {
        if command.password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }

        let user_id = command.user_id;
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            run_blocking(move || authenticator.hash_password(&password)).await??;

        let credential = self
            .store
            .update_hash(user_id, &password_hash)
            .await?
            .ok_or(CredentialError::NotFound(user_id))?;

        tracing::info!(user_id = %user_id, "Password changed");

        Ok(credential)
    }

    async fn delete_user(&self, requester: UserId, id: UserId) -> Result<(), CredentialError> {
        if requester != id {
            tracing::warn!(requester = %requester, user_id = %id, "Delete refused: not the owner");
            return Err(CredentialError::Forbidden(id));
        }

        if !self.store.delete(id).await? {
            return Err(CredentialError::NotFound(id));
        }

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
