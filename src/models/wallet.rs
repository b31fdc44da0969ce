use crate::models::errors::WalletError;
use crate::models::{Transaction, TransactionType};
use crate::types::{CurrencyCode, TransactionId, UserId, WalletId};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A balance held in a single currency on behalf of one user.
///
/// Every balance change goes through a [`Transaction`]: the mutation methods build the
/// ledger row, check it against the current balance and only then move the balance, so a
/// failed call leaves the wallet untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wallet {
    #[serde(rename = "id")]
    pub wallet_id: WalletId,
    /// The user the wallet belongs to.
    pub owner: UserId,
    pub name: String,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub balance: Decimal,
    /// Whether expenses may take the balance below zero.
    #[serde(default)]
    pub overdraft: bool
}

impl Wallet {
    pub fn new(wallet_id: WalletId, owner: UserId, name: impl Into<String>, currency: CurrencyCode) -> Self {
        Self {
            wallet_id,
            owner,
            name: name.into(),
            currency,
            balance: Decimal::ZERO,
            overdraft: false
        }
    }

    pub fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_overdraft(mut self, overdraft: bool) -> Self {
        self.overdraft = overdraft;
        self
    }

    /// Records money coming into the wallet.
    ///
    /// # Errors
    /// Returns `WalletError::InvalidAmount` if `amount` is zero or negative.
    pub fn income(&mut self, transaction_id: TransactionId, amount: Decimal, description: Option<String>) -> Result<Transaction, WalletError> {
        let transaction = Transaction::new(transaction_id, self.wallet_id, TransactionType::Income, amount)
            .with_description(description);

        self.apply(&transaction)?;

        Ok(transaction)
    }

    /// Records money leaving the wallet.
    ///
    /// # Errors
    /// Returns `WalletError` if:
    /// - `amount` is zero or negative.
    /// - The balance would drop below zero on a wallet without overdraft.
    pub fn expense(&mut self, transaction_id: TransactionId, amount: Decimal, description: Option<String>) -> Result<Transaction, WalletError> {
        let transaction = Transaction::new(transaction_id, self.wallet_id, TransactionType::Expense, amount)
            .with_description(description);

        self.apply(&transaction)?;

        Ok(transaction)
    }

    /// Moves value from this wallet into `destination`.
    ///
    /// `original_amount` is debited here in this wallet's currency and `converted_amount` is
    /// credited to `destination` in its currency. The expense leg uses `legs.0` as its id, the
    /// income leg `legs.1`, and each leg references the other. Both balances are checked
    /// before either one changes.
    pub fn transfer(
        &mut self,
        destination: &mut Wallet,
        legs: (TransactionId, TransactionId),
        original_amount: Decimal,
        converted_amount: Decimal,
        description: Option<String>
    ) -> Result<(Transaction, Transaction), WalletError> {
        if self.wallet_id == destination.wallet_id {
            return Err(WalletError::same_wallet(self))
        }

        let (expense_id, income_id) = legs;
        let created_at = Utc::now();

        let mut expense = Transaction::new(expense_id, self.wallet_id, TransactionType::Expense, original_amount)
            .with_description(description.clone())
            .with_created_at(created_at);
        expense.reference_id = Some(income_id);

        let mut income = Transaction::new(income_id, destination.wallet_id, TransactionType::Income, converted_amount)
            .with_description(description)
            .with_created_at(created_at);
        income.reference_id = Some(expense_id);

        let debited = self.balance_after(&expense)?;
        let credited = destination.balance_after(&income)?;

        self.balance = debited;
        destination.balance = credited;

        Ok((expense, income))
    }

    /// Applies an existing ledger row to the balance.
    pub fn apply(&mut self, transaction: &Transaction) -> Result<(), WalletError> {
        self.balance = self.balance_after(transaction)?;

        Ok(())
    }

    /// Undoes the balance effect of a ledger row that is being removed.
    pub fn revert(&mut self, transaction: &Transaction) -> Result<(), WalletError> {
        self.check_owned(transaction)?;
        self.balance = self.shifted(transaction, -transaction.signed_amount())?;

        Ok(())
    }

    /// Swaps the balance effect of `original` for that of `edited`.
    pub fn replace(&mut self, original: &Transaction, edited: &Transaction) -> Result<(), WalletError> {
        self.check_owned(original)?;
        self.check_owned(edited)?;
        self.check_positive(edited)?;

        let delta = edited.signed_amount().checked_sub(original.signed_amount())
            .ok_or_else(|| WalletError::overflow(self, edited))?;

        self.balance = self.shifted(edited, delta)?;

        Ok(())
    }

    fn balance_after(&self, transaction: &Transaction) -> Result<Decimal, WalletError> {
        self.check_owned(transaction)?;
        self.check_positive(transaction)?;

        self.shifted(transaction, transaction.signed_amount())
    }

    fn shifted(&self, transaction: &Transaction, delta: Decimal) -> Result<Decimal, WalletError> {
        let balance = self.balance.checked_add(delta)
            .ok_or_else(|| WalletError::overflow(self, transaction))?;

        if delta < Decimal::ZERO && balance < Decimal::ZERO && !self.overdraft {
            return Err(WalletError::insufficient_funds(self, transaction))
        }

        Ok(balance)
    }

    fn check_owned(&self, transaction: &Transaction) -> Result<(), WalletError> {
        if transaction.wallet_id != self.wallet_id {
            return Err(WalletError::foreign_transaction(self, transaction))
        }

        Ok(())
    }

    fn check_positive(&self, transaction: &Transaction) -> Result<(), WalletError> {
        if transaction.amount <= Decimal::ZERO {
            return Err(WalletError::invalid_amount(self, transaction))
        }

        Ok(())
    }
}
