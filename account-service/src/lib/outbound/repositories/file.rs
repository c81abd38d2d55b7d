use async_trait::async_trait;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::AccountId;
use crate::account::models::FileKind;
use crate::account::models::StoredFile;
use crate::account::ports::FileRepository;

pub struct PostgresFileRepository {
    pool: PgPool,
}

impl PostgresFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PostgresFileRepository {
    async fn create(&self, file: StoredFile) -> Result<StoredFile, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO files (id, url, storage_key, mime_type, account_id, kind, is_removed,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(file.id.0)
        .bind(&file.url)
        .bind(&file.storage_key)
        .bind(&file.mime_type)
        .bind(file.account_id.0)
        .bind(file.kind.as_str())
        .bind(file.is_removed)
        .bind(file.created_at)
        .bind(file.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(file)
    }

    async fn mark_removed(
        &self,
        account_id: &AccountId,
        kind: FileKind,
    ) -> Result<u64, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE files
            SET is_removed = TRUE, updated_at = NOW()
            WHERE account_id = $1 AND kind = $2 AND is_removed = FALSE
            "#,
        )
        .bind(account_id.0)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
