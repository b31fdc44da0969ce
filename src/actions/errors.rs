use rust_decimal::Decimal;
use thiserror::Error;

use crate::currency::CurrencyError;
use crate::models::WalletError;
use crate::types::{CurrencyCode, TransactionId, WalletId};

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid [{field}]: {reason}")]
    Validation {
        field: &'static str,
        reason: String
    },
    #[error("Amount [{amount}] is not valid for [{currency}]: {reason}")]
    InvalidAmount {
        amount: Decimal,
        currency: CurrencyCode,
        reason: &'static str
    },
    #[error("Wallet [{wallet_id}] was not found")]
    WalletNotFound {
        wallet_id: WalletId
    },
    #[error("Transaction [{transaction_id}] was not found")]
    TransactionNotFound {
        transaction_id: TransactionId
    },
    #[error("Origin and destination are the same wallet [{wallet_id}]")]
    SameWallet {
        wallet_id: WalletId
    },
    #[error("Transaction [{transaction_id}] cannot be edited: {reason}")]
    EditForbidden {
        transaction_id: TransactionId,
        reason: &'static str
    },
    #[error(transparent)]
    Currency(#[from] CurrencyError),
    #[error(transparent)]
    Wallet(#[from] WalletError)
}

impl ActionError {
    pub fn validation(field: &'static str, reason: impl ToString) -> Self {
        Self::Validation { field, reason: reason.to_string() }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::validation(field, "value is required")
    }

    pub fn wallet_not_found(wallet_id: WalletId) -> Self {
        Self::WalletNotFound { wallet_id }
    }

    pub fn transaction_not_found(transaction_id: TransactionId) -> Self {
        Self::TransactionNotFound { transaction_id }
    }

    /// Whether the error is about the amount itself, however it was detected.
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, Self::InvalidAmount { .. } | Self::Wallet(WalletError::InvalidAmount { .. }))
    }
}
