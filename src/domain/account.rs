use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

/// Account numbers are assigned by the store, monotonically, and never
/// reused.
pub type AccountNumber = i64;

/// A bank account: the sole entity of the ledger.
///
/// `number` and `name` are immutable once the account exists; only the
/// balance changes, and only through deposit/withdraw operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub number: AccountNumber,
    pub name: String,
    pub balance_cents: Cents,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Whether `amount_cents` can be withdrawn without overdrawing.
    /// A withdrawal of exactly the full balance is covered.
    pub fn covers(&self, amount_cents: Cents) -> bool {
        self.balance_cents >= amount_cents
    }
}
