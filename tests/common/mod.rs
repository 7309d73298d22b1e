// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use kontor::application::LedgerService;
use kontor::domain::AccountNumber;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to open an account with a funded balance, returning its number
pub async fn open_funded(
    service: &LedgerService,
    name: &str,
    cents: i64,
) -> Result<AccountNumber> {
    let account = service.open_account(name, cents).await?;
    Ok(account.number)
}
