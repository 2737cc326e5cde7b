use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::StoredCredential;
use crate::domain::credential::models::UserId;
use crate::domain::credential::models::Username;
use crate::domain::credential::ports::CredentialStore;

/// Credential store backed by a `users (id BIGSERIAL, username TEXT UNIQUE, password_hash TEXT)` table.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: i64,
    username: String,
    password_hash: String,
}

impl TryFrom<CredentialRow> for StoredCredential {
    type Error = CredentialError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let id = u64::try_from(row.id).map_err(|_| {
            CredentialError::StoreUnavailable(format!("Negative user id in store: {}", row.id))
        })?;

        Ok(StoredCredential {
            id: UserId(id),
            username: row.username,
            password_hash: row.password_hash,
        })
    }
}

fn store_error(e: sqlx::Error) -> CredentialError {
    tracing::error!(error = %e, "Credential store query failed");
    CredentialError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredCredential>, CredentialError> {
        // Ids beyond BIGINT range cannot exist in the table
        let Ok(id) = i64::try_from(id.0) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(StoredCredential::try_from).transpose()
    }

    async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<StoredCredential, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return CredentialError::UsernameAlreadyExists(username.as_str().to_string());
                }
            }
            store_error(e)
        })?;

        StoredCredential::try_from(row)
    }

    async fn update_hash(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<Option<StoredCredential>, CredentialError> {
        let Ok(id) = i64::try_from(id.0) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            UPDATE users
            SET password_hash = $2
            WHERE id = $1
            RETURNING id, username, password_hash
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(StoredCredential::try_from).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<bool, CredentialError> {
        let Ok(id) = i64::try_from(id.0) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
