use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::ports::CredentialRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "credentials_email_key";

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn credential_from_row(row: PgRow) -> Result<Credential, sqlx::Error> {
    let id: Uuid = row.try_get("id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Credential {
        id: CredentialId(id),
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at,
    })
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_email(&self, email: &str) -> Result<Vec<Credential>, CredentialError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| credential_from_row(row).map_err(CredentialError::from))
            .collect()
    }

    async fn create(&self, credential: Credential) -> Result<Credential, CredentialError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(credential.id.0)
        .bind(&credential.email)
        .bind(&credential.password_hash)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return CredentialError::DuplicateEmail;
                }
            }
            CredentialError::from(e)
        })?;

        Ok(credential)
    }

    async fn delete(&self, credential: &Credential) -> Result<(), CredentialError> {
        let result = sqlx::query(
            r#"
            DELETE FROM credentials
            WHERE id = $1
            "#,
        )
        .bind(credential.id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CredentialError::Store(format!(
                "credential {} not found",
                credential.id
            )));
        }

        Ok(())
    }
}
