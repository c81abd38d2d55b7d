use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountName;
use crate::account::models::Address;
use crate::account::models::ContactNumber;
use crate::account::models::EmailAddress;
use crate::account::models::HashedPassword;
use crate::account::models::UpdateBasicInfoCommand;
use crate::account::ports::AccountRepository;

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, name, contact_no, role, is_verified, \
                               avatar, address, created_at, updated_at";

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    contact_no: String,
    role: String,
    is_verified: bool,
    avatar: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: HashedPassword::from_hash(row.password_hash),
            name: AccountName::new(row.name)?,
            contact_no: ContactNumber::new(row.contact_no)?,
            role: row.role.parse()?,
            is_verified: row.is_verified,
            avatar: row.avatar,
            address: row.address.map(Address::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, email: &EmailAddress) -> AccountError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("accounts_email_key") {
            return AccountError::EmailAlreadyExists(email.as_str().to_string());
        }
    }
    AccountError::DatabaseError(e.to_string())
}

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash, name, contact_no, role, is_verified,
                                  avatar, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.name.as_str())
        .bind(account.contact_no.as_str())
        .bind(account.role.as_str())
        .bind(account.is_verified)
        .bind(account.avatar.as_deref())
        .bind(account.address.as_ref().map(|a| a.as_str()))
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &account.email))?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS))
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM accounts WHERE email = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows: Vec<AccountRow> = sqlx::query_as(&format!(
            "SELECT {} FROM accounts ORDER BY created_at DESC",
            ACCOUNT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn update_password(
        &self,
        id: &AccountId,
        password_hash: &HashedPassword,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(password_hash.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn update_basic_info(
        &self,
        id: &AccountId,
        command: &UpdateBasicInfoCommand,
    ) -> Result<Account, AccountError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            r#"
            UPDATE accounts
            SET name = $2, contact_no = $3, address = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(id.0)
        .bind(command.name.as_str())
        .bind(command.contact_no.as_str())
        .bind(command.address.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.ok_or(AccountError::NotFound(id.to_string()))?
            .try_into()
    }

    async fn set_avatar(&self, id: &AccountId, avatar_url: &str) -> Result<Account, AccountError> {
        let row: Option<AccountRow> = sqlx::query_as(&format!(
            r#"
            UPDATE accounts
            SET avatar = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(id.0)
        .bind(avatar_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.ok_or(AccountError::NotFound(id.to_string()))?
            .try_into()
    }

    async fn mark_verified(&self, id: &AccountId) -> Result<bool, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET is_verified = TRUE, updated_at = NOW()
            WHERE id = $1 AND is_verified = FALSE
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
