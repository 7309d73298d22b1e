use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::{Account, AccountNumber, Cents};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying accounts.
///
/// This is the ledger store: it offers atomic single-record
/// create/read/update primitives and knows nothing about business rules.
/// Amount validation and the sufficient-funds check live in the service
/// layer; the store trusts its callers to pass balances computed from a
/// just-read value.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Insert a new account and return its store-assigned number.
    /// The record is durably committed before this returns.
    pub async fn create_account(
        &self,
        name: &str,
        initial_cents: Cents,
    ) -> Result<AccountNumber> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (name, balance_cents, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(initial_cents)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to create account")?;

        Ok(result.last_insert_rowid())
    }

    /// Get an account by number. `None` means no such record exists.
    pub async fn get_account(&self, number: AccountNumber) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT account_number, name, balance_cents, created_at
            FROM accounts
            WHERE account_number = ?
            "#,
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// Overwrite an account's balance. Returns `false` if the number does
    /// not exist at the time of the write; `true` means the new balance is
    /// committed and visible to every subsequent read.
    pub async fn update_balance(
        &self,
        number: AccountNumber,
        new_cents: Cents,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE accounts SET balance_cents = ? WHERE account_number = ?")
            .bind(new_cents)
            .bind(number)
            .execute(&self.pool)
            .await
            .context("Failed to update balance")?;

        Ok(result.rows_affected() > 0)
    }

    /// List all accounts, ordered by account number.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"
            SELECT account_number, name, balance_cents, created_at
            FROM accounts
            ORDER BY account_number
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list accounts")?;

        rows.iter().map(Self::row_to_account).collect()
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
        let created_at_str: String = row.get("created_at");

        Ok(Account {
            number: row.get("account_number"),
            name: row.get("name"),
            balance_cents: row.get("balance_cents"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }
}
