mod common;

use anyhow::Result;
use common::test_service;
use kontor::application::AppError;

#[tokio::test]
async fn test_open_then_read_round_trip() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = service.open_account("Alice", 10000).await?;
    assert_eq!(account.name, "Alice");
    assert_eq!(account.balance_cents, 10000);

    let balance = service.get_balance(account.number).await?;
    assert_eq!(balance, 10000);

    Ok(())
}

#[tokio::test]
async fn test_account_numbers_are_assigned_in_order() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let first = service.open_account("Alice", 0).await?;
    let second = service.open_account("Bob", 5000).await?;
    let third = service.open_account("Carol", 100).await?;

    assert_eq!(first.number, 1);
    assert_eq!(second.number, 2);
    assert_eq!(third.number, 3);

    Ok(())
}

#[tokio::test]
async fn test_open_account_with_zero_balance() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = service.open_account("Alice", 0).await?;
    assert_eq!(service.get_balance(account.number).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_open_account_rejects_empty_name() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.open_account("", 10000).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidName));

    let err = service.open_account("   ", 10000).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidName));

    // Nothing was persisted
    assert!(service.list_accounts().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_open_account_rejects_negative_initial_amount() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.open_account("Alice", -1).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));
    assert!(service.list_accounts().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_open_account_trims_name() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = service.open_account("  Alice  ", 100).await?;
    assert_eq!(account.name, "Alice");

    Ok(())
}

#[tokio::test]
async fn test_balance_check_on_unknown_account() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let err = service.get_balance(999).await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(999)));

    Ok(())
}

#[tokio::test]
async fn test_balance_reads_are_idempotent() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let account = service.open_account("Alice", 4200).await?;

    let first = service.get_balance(account.number).await?;
    let second = service.get_balance(account.number).await?;
    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn test_list_accounts_ordered_by_number() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.open_account("Bob", 5000).await?;
    service.open_account("Alice", 10000).await?;

    let accounts = service.list_accounts().await?;
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].number, 1);
    assert_eq!(accounts[0].name, "Bob");
    assert_eq!(accounts[1].number, 2);
    assert_eq!(accounts[1].name, "Alice");

    Ok(())
}
