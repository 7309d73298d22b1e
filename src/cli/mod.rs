use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::{format_cents, parse_cents, AccountNumber, Cents};
use crate::io::Exporter;

/// Kontor - Bank Account Ledger
#[derive(Parser)]
#[command(name = "kontor")]
#[command(about = "A SQLite-backed bank account ledger")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "bank.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Open a new account
    Open {
        /// Account holder name
        name: String,

        /// Initial deposit amount (e.g., "100.00" or "100")
        #[arg(short, long, default_value = "0")]
        amount: String,
    },

    /// Deposit money into an account
    Deposit {
        /// Account number
        number: AccountNumber,

        /// Amount to deposit (e.g., "25.00" or "25")
        amount: String,
    },

    /// Withdraw money from an account
    Withdraw {
        /// Account number
        number: AccountNumber,

        /// Amount to withdraw (e.g., "25.00" or "25")
        amount: String,
    },

    /// Show the current balance of an account
    Balance {
        /// Account number
        number: AccountNumber,
    },

    /// List all accounts
    Accounts,

    /// Export accounts to CSV or JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: csv, json (default: csv)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Initialized database: {}", self.database);
            }

            Commands::Open { name, amount } => {
                let initial_cents = parse_amount(&amount)?;
                // Opening the first account on a fresh database must work,
                // so this creates and migrates the file if needed.
                let service = LedgerService::init(&self.database).await?;
                let account = service.open_account(&name, initial_cents).await?;
                println!(
                    "Account created! Your account number is {}.",
                    account.number
                );
            }

            Commands::Deposit { number, amount } => {
                let amount_cents = parse_amount(&amount)?;
                let service = LedgerService::connect(&self.database).await?;
                let new_balance = service.deposit(number, amount_cents).await?;
                println!(
                    "Deposited {}. New balance is {}.",
                    format_cents(amount_cents),
                    format_cents(new_balance)
                );
            }

            Commands::Withdraw { number, amount } => {
                let amount_cents = parse_amount(&amount)?;
                let service = LedgerService::connect(&self.database).await?;
                let new_balance = service.withdraw(number, amount_cents).await?;
                println!(
                    "Withdrew {}. New balance is {}.",
                    format_cents(amount_cents),
                    format_cents(new_balance)
                );
            }

            Commands::Balance { number } => {
                let service = LedgerService::connect(&self.database).await?;
                let balance = service.get_balance(number).await?;
                println!("Current balance: {}", format_cents(balance));
            }

            Commands::Accounts => {
                let service = LedgerService::connect(&self.database).await?;
                let accounts = service.list_accounts().await?;
                if accounts.is_empty() {
                    println!("No accounts found.");
                } else {
                    println!("{:<10} {:<20} {:>12}", "NUMBER", "NAME", "BALANCE");
                    println!("{}", "-".repeat(44));
                    for account in accounts {
                        println!(
                            "{:<10} {:<20} {:>12}",
                            account.number,
                            account.name,
                            format_cents(account.balance_cents)
                        );
                    }
                }
            }

            Commands::Export { output, format } => {
                let service = LedgerService::connect(&self.database).await?;
                run_export_command(&service, output.as_deref(), &format).await?;
            }
        }

        Ok(())
    }
}

fn parse_amount(input: &str) -> Result<Cents> {
    parse_cents(input).with_context(|| format!("Invalid amount: '{}'", input))
}

async fn run_export_command(
    service: &LedgerService,
    output: Option<&str>,
    format: &str,
) -> Result<()> {
    let exporter = Exporter::new(service);

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    match format {
        "csv" => {
            let count = exporter.export_accounts_csv(&mut writer).await?;
            if output.is_some() {
                println!("Exported {} accounts.", count);
            }
        }
        "json" => {
            let snapshot = exporter.export_accounts_json(&mut writer).await?;
            if output.is_some() {
                println!("Exported {} accounts.", snapshot.accounts.len());
            }
        }
        other => anyhow::bail!("Unknown export format '{}'. Valid formats: csv, json", other),
    }

    Ok(())
}
