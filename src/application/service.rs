use tokio::sync::Mutex;

use crate::domain::{Account, AccountNumber, Cents};
use crate::storage::Repository;

use super::AppError;

/// Application service providing the account-ledger operations.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
///
/// The service caches nothing between calls: every mutation re-reads the
/// persisted balance before writing, so it never acts on stale state.
pub struct LedgerService {
    repo: Repository,
    /// Serializes read-modify-write cycles. Without this, two concurrent
    /// deposits can read the same balance and one update is lost.
    write_lock: Mutex<()>,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Open a new account with a non-empty name and a non-negative initial
    /// balance (zero is allowed). Returns the persisted record, including
    /// the store-assigned account number.
    pub async fn open_account(
        &self,
        name: &str,
        initial_cents: Cents,
    ) -> Result<Account, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidName);
        }
        if initial_cents < 0 {
            return Err(AppError::InvalidAmount(
                "Initial amount cannot be negative".to_string(),
            ));
        }

        let number = self.repo.create_account(name, initial_cents).await?;
        self.repo
            .get_account(number)
            .await?
            .ok_or(AppError::AccountNotFound(number))
    }

    /// Deposit a positive amount. Returns the new balance.
    pub async fn deposit(
        &self,
        number: AccountNumber,
        amount_cents: Cents,
    ) -> Result<Cents, AppError> {
        // Rejected before any storage access.
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Deposit amount must be positive".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;

        let account = self
            .repo
            .get_account(number)
            .await?
            .ok_or(AppError::AccountNotFound(number))?;

        let new_balance = account.balance_cents + amount_cents;
        if !self.repo.update_balance(number, new_balance).await? {
            return Err(AppError::AccountNotFound(number));
        }

        Ok(new_balance)
    }

    /// Withdraw a positive amount, up to and including the full balance.
    /// Returns the new balance. No partial withdrawal: insufficient funds
    /// leaves the balance untouched.
    pub async fn withdraw(
        &self,
        number: AccountNumber,
        amount_cents: Cents,
    ) -> Result<Cents, AppError> {
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Withdrawal amount must be positive".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;

        let account = self
            .repo
            .get_account(number)
            .await?
            .ok_or(AppError::AccountNotFound(number))?;

        if !account.covers(amount_cents) {
            return Err(AppError::InsufficientFunds {
                number,
                balance_cents: account.balance_cents,
                requested_cents: amount_cents,
            });
        }

        let new_balance = account.balance_cents - amount_cents;
        if !self.repo.update_balance(number, new_balance).await? {
            return Err(AppError::AccountNotFound(number));
        }

        Ok(new_balance)
    }

    /// Get the current balance. Pure read; no mutation, no lock.
    pub async fn get_balance(&self, number: AccountNumber) -> Result<Cents, AppError> {
        Ok(self.get_account(number).await?.balance_cents)
    }

    /// Get the full account record.
    pub async fn get_account(&self, number: AccountNumber) -> Result<Account, AppError> {
        self.repo
            .get_account(number)
            .await?
            .ok_or(AppError::AccountNotFound(number))
    }

    /// List all accounts, ordered by account number.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.repo.list_accounts().await?)
    }
}
