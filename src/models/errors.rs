use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Transaction, TransactionType, Wallet};
use crate::types::{TransactionId, WalletId};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Amount [{amount}] must be positive for transaction [{transaction_id}]:[{transaction_type:?}] on wallet [{wallet_id}]")]
    InvalidAmount {
        wallet_id: WalletId,
        transaction_id: TransactionId,
        transaction_type: TransactionType,
        amount: Decimal
    },
    #[error("Insufficient funds for transaction [{transaction_id}]:[{transaction_type:?}] of [{amount}] on wallet [{wallet_id}] with balance [{balance}]")]
    InsufficientFunds {
        wallet_id: WalletId,
        transaction_id: TransactionId,
        transaction_type: TransactionType,
        amount: Decimal,
        balance: Decimal
    },
    #[error("Numeric overflow occurred for transaction [{transaction_id}]:[{transaction_type:?}] on wallet [{wallet_id}]")]
    Overflow {
        wallet_id: WalletId,
        transaction_id: TransactionId,
        transaction_type: TransactionType
    },
    #[error("Transaction [{transaction_id}] belongs to wallet [{owner}], not wallet [{wallet_id}]")]
    ForeignTransaction {
        wallet_id: WalletId,
        transaction_id: TransactionId,
        owner: WalletId
    },
    #[error("Wallet [{wallet_id}] cannot transfer to itself")]
    SameWallet {
        wallet_id: WalletId
    }
}

impl WalletError {
    pub fn invalid_amount(wallet: &Wallet, tx: &Transaction) -> Self {
        Self::InvalidAmount {
            wallet_id: wallet.wallet_id,
            transaction_id: tx.transaction_id,
            transaction_type: tx.transaction_type,
            amount: tx.amount
        }
    }

    pub fn insufficient_funds(wallet: &Wallet, tx: &Transaction) -> Self {
        Self::InsufficientFunds {
            wallet_id: wallet.wallet_id,
            transaction_id: tx.transaction_id,
            transaction_type: tx.transaction_type,
            amount: tx.amount,
            balance: wallet.balance
        }
    }

    pub fn overflow(wallet: &Wallet, tx: &Transaction) -> Self {
        Self::Overflow {
            wallet_id: wallet.wallet_id,
            transaction_id: tx.transaction_id,
            transaction_type: tx.transaction_type
        }
    }

    pub fn foreign_transaction(wallet: &Wallet, tx: &Transaction) -> Self {
        Self::ForeignTransaction {
            wallet_id: wallet.wallet_id,
            transaction_id: tx.transaction_id,
            owner: tx.wallet_id
        }
    }

    pub fn same_wallet(wallet: &Wallet) -> Self {
        Self::SameWallet { wallet_id: wallet.wallet_id }
    }
}
