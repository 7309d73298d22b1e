use thiserror::Error;

use crate::domain::{AccountNumber, Cents};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),

    #[error(
        "Insufficient funds in account {number}: balance {balance_cents}, requested {requested_cents}"
    )]
    InsufficientFunds {
        number: AccountNumber,
        balance_cents: Cents,
        requested_cents: Cents,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Account name cannot be empty")]
    InvalidName,

    #[error("Storage unavailable: {0}")]
    Storage(#[from] anyhow::Error),
}
