mod errors;
#[cfg(test)]
mod tests;
mod transaction;
mod wallet;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use errors::WalletError;
pub use transaction::Transaction;
pub use wallet::Wallet;

/// The direction stored on a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense
}

/// The type shown to users: a row with a reference is always a transfer leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Income,
    Expense,
    Transfer
}

impl Display for DisplayType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            DisplayType::Income => "income",
            DisplayType::Expense => "expense",
            DisplayType::Transfer => "transfer"
        };

        formatter.write_str(label)
    }
}

impl FromStr for DisplayType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "income" => Ok(DisplayType::Income),
            "expense" => Ok(DisplayType::Expense),
            "transfer" => Ok(DisplayType::Transfer),
            other => Err(format!("unknown transaction type '{other}'"))
        }
    }
}
