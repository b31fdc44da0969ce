use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::Transaction;
use crate::types::{TransactionId, UserId, WalletId};

/// Input of the income and expense actions.
///
/// `amount` is kept as entered so a non-numeric value is reported as a validation failure.
/// `currency` defaults to the wallet's own currency.
#[derive(Debug, Clone, Default)]
pub struct EntryRequest {
    /// Must own the wallet.
    pub user: UserId,
    pub wallet_id: WalletId,
    pub amount: String,
    pub currency: Option<String>,
    pub description: Option<String>
}

/// Input of the transfer action. `amount` is in the origin wallet's currency.
#[derive(Debug, Clone, Default)]
pub struct TransferRequest {
    /// Must own the origin wallet. The destination may belong to anyone.
    pub user: UserId,
    pub origin_id: WalletId,
    pub destination_id: WalletId,
    pub amount: String,
    pub description: Option<String>
}

/// Correction of a standalone income or expense. Absent fields stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    /// The user asking for the edit.
    pub user: UserId,
    pub transaction_id: TransactionId,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>
}

/// Removal of ledger rows. Naming either leg of a transfer removes both.
#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    pub user: UserId,
    pub transaction_ids: Vec<TransactionId>
}

#[derive(Debug, Clone)]
pub enum Action {
    Income(EntryRequest),
    Expense(EntryRequest),
    Transfer(TransferRequest),
    Edit(EditRequest),
    Delete(DeleteRequest)
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Recorded(Transaction),
    Transferred(Transaction, Transaction),
    Edited(Transaction),
    Deleted(Vec<Transaction>)
}

impl Display for Outcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Recorded(transaction) => write!(
                formatter,
                "Transaction [{}]:[{:?}] of [{}] recorded on wallet [{}]",
                transaction.transaction_id, transaction.transaction_type, transaction.amount, transaction.wallet_id
            ),
            Outcome::Transferred(expense, income) => write!(
                formatter,
                "Transfer [{}]->[{}] of [{}] from wallet [{}] as [{}] into wallet [{}]",
                expense.transaction_id, income.transaction_id, expense.amount, expense.wallet_id, income.amount, income.wallet_id
            ),
            Outcome::Edited(transaction) => write!(
                formatter,
                "Transaction [{}] on wallet [{}] edited",
                transaction.transaction_id, transaction.wallet_id
            ),
            Outcome::Deleted(transactions) => write!(formatter, "[{}] transactions deleted", transactions.len())
        }
    }
}
