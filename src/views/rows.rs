use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency::CurrencyDetail;
use crate::models::{DisplayType, Transaction, TransactionType, Wallet};
use crate::types::{CurrencyCode, TransactionId, UserId, WalletId};
use crate::views::format::{format_amount, format_timestamp};

/// Colour of the type badge shown next to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Info,
    Danger,
    Success
}

impl BadgeColor {
    /// Incoming transfer legs are info, every expense is danger and standalone income is success.
    pub fn of(transaction: &Transaction) -> Self {
        match (transaction.transaction_type, transaction.is_transfer_leg()) {
            (TransactionType::Expense, _) => BadgeColor::Danger,
            (TransactionType::Income, true) => BadgeColor::Info,
            (TransactionType::Income, false) => BadgeColor::Success
        }
    }
}

/// A ledger row ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub display_type: DisplayType,
    /// Name of the wallet the row belongs to.
    pub wallet: String,
    pub amount: String,
    pub description: String,
    pub created_at: String,
    pub reference: Option<TransactionId>,
    #[serde(skip)]
    pub badge: BadgeColor
}

impl TransactionRow {
    pub fn new(transaction: &Transaction, wallet: &Wallet, currency: &CurrencyDetail) -> Self {
        Self {
            id: transaction.transaction_id,
            display_type: transaction.display_type(),
            wallet: wallet.name.clone(),
            amount: format_amount(transaction.amount, currency),
            description: transaction.description.clone().unwrap_or_else(|| "-".to_string()),
            created_at: format_timestamp(&transaction.created_at),
            reference: transaction.reference_id,
            badge: BadgeColor::of(transaction)
        }
    }
}

/// A wallet with its balance as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletRow {
    pub wallet: WalletId,
    pub owner: UserId,
    pub name: String,
    pub currency: CurrencyCode,
    pub balance: Decimal
}

impl From<&Wallet> for WalletRow {
    fn from(wallet: &Wallet) -> Self {
        Self {
            wallet: wallet.wallet_id,
            owner: wallet.owner,
            name: wallet.name.clone(),
            currency: wallet.currency.clone(),
            balance: wallet.balance
        }
    }
}
