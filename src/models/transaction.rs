use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{DisplayType, TransactionType};
use crate::types::{TransactionId, WalletId};

/// A single ledger row against one wallet.
///
/// Rows are only produced by wallet mutations. The two legs of a transfer point at each
/// other through `reference_id`; standalone incomes and expenses leave it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    /// The wallet whose balance this row moved.
    pub wallet_id: WalletId,
    pub transaction_type: TransactionType,
    /// Always positive, expressed in the wallet's currency.
    pub amount: Decimal,
    pub description: Option<String>,
    /// The other leg of a transfer.
    pub reference_id: Option<TransactionId>,
    pub created_at: DateTime<Utc>
}

impl Transaction {
    pub fn new(transaction_id: TransactionId, wallet_id: WalletId, transaction_type: TransactionType, amount: Decimal) -> Self {
        Self {
            transaction_id,
            wallet_id,
            transaction_type,
            amount,
            description: None,
            reference_id: None,
            created_at: Utc::now()
        }
    }

    /// Sets the description, treating blank text as no description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = normalize_description(description);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// The balance effect of this row: positive for income, negative for expense.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount
        }
    }

    pub fn is_transfer_leg(&self) -> bool {
        self.reference_id.is_some()
    }

    pub fn display_type(&self) -> DisplayType {
        match (self.reference_id, self.transaction_type) {
            (Some(_), _) => DisplayType::Transfer,
            (None, TransactionType::Income) => DisplayType::Income,
            (None, TransactionType::Expense) => DisplayType::Expense
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
