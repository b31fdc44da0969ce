use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::actions::errors::ActionError;
use crate::actions::requests::{Action, DeleteRequest, EditRequest, EntryRequest, Outcome, TransferRequest};
use crate::currency::{CurrencyDetail, CurrencyRepository, RateTable};
use crate::models::{Transaction, TransactionType, Wallet};
use crate::storage::{Storage, UnitOfWork};
use crate::types::{CurrencyCode, TransactionId, UserId, WalletId};
use crate::views::{parse_timestamp, TransactionFilter, TransactionRow, WalletRow, TIMESTAMP_FORMAT};

/// Entry point for every ledger action.
///
/// Each mutating action runs inside a single [`Storage::atomically`] call, so a rejected
/// request leaves no wallet or transaction changes behind.
pub struct TransactionActions<S: Storage, C: CurrencyRepository> {
    storage: Arc<S>,
    currencies: Arc<C>
}

impl<S: Storage, C: CurrencyRepository> TransactionActions<S, C> {
    pub fn new(storage: Arc<S>, currencies: Arc<C>) -> Self {
        Self { storage, currencies }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn dispatch(&self, action: Action) -> Result<Outcome, ActionError> {
        let outcome = match action {
            Action::Income(request) => self.income(request).map(Outcome::Recorded),
            Action::Expense(request) => self.expense(request).map(Outcome::Recorded),
            Action::Transfer(request) => self.transfer(request)
                .map(|(expense, income)| Outcome::Transferred(expense, income)),
            Action::Edit(request) => self.edit(request).map(Outcome::Edited),
            Action::Delete(request) => self.delete(request).map(Outcome::Deleted)
        }?;

        debug!("{outcome}");

        Ok(outcome)
    }

    /// Credits a wallet, converting from the entered currency when it differs from the wallet's.
    pub fn income(&self, request: EntryRequest) -> Result<Transaction, ActionError> {
        self.record(request, TransactionType::Income)
    }

    /// Debits a wallet, converting from the entered currency when it differs from the wallet's.
    pub fn expense(&self, request: EntryRequest) -> Result<Transaction, ActionError> {
        self.record(request, TransactionType::Expense)
    }

    fn record(&self, request: EntryRequest, transaction_type: TransactionType) -> Result<Transaction, ActionError> {
        let amount = parse_amount(&request.amount)?;
        let entered = parse_currency(request.currency.as_deref())?;
        let rates = self.currencies.details()?;

        self.storage.atomically(|unit| -> Result<_, ActionError> {
            let mut wallet = owned_wallet(unit, request.wallet_id, request.user)?;
            let currency = entered.unwrap_or_else(|| wallet.currency.clone());

            check_amount(amount, rates.get(&currency)?)?;
            let amount = RateTable::convert(&rates, amount, &currency, &wallet.currency)?;

            let transaction_id = unit.next_transaction_id();
            let transaction = match transaction_type {
                TransactionType::Income => wallet.income(transaction_id, amount, request.description)?,
                TransactionType::Expense => wallet.expense(transaction_id, amount, request.description)?
            };

            unit.put_wallet(wallet);
            unit.put_transaction(transaction.clone());

            Ok(transaction)
        })
    }

    /// Moves value between two wallets as a linked expense and income pair.
    ///
    /// The entered amount is debited from the origin in its own currency. The destination
    /// is credited with the converted amount when the currencies differ.
    pub fn transfer(&self, request: TransferRequest) -> Result<(Transaction, Transaction), ActionError> {
        if request.origin_id == request.destination_id {
            return Err(ActionError::SameWallet { wallet_id: request.origin_id })
        }

        let amount = parse_amount(&request.amount)?;
        let rates = self.currencies.details()?;

        self.storage.atomically(|unit| -> Result<_, ActionError> {
            let mut origin = owned_wallet(unit, request.origin_id, request.user)?;
            let mut destination = unit.wallet(request.destination_id)
                .ok_or_else(|| ActionError::wallet_not_found(request.destination_id))?;

            check_amount(amount, rates.get(&origin.currency)?)?;
            let converted = RateTable::convert(&rates, amount, &origin.currency, &destination.currency)?;

            let legs = (unit.next_transaction_id(), unit.next_transaction_id());
            let (expense, income) = origin.transfer(&mut destination, legs, amount, converted, request.description)?;

            unit.put_wallet(origin);
            unit.put_wallet(destination);
            unit.put_transaction(expense.clone());
            unit.put_transaction(income.clone());

            Ok((expense, income))
        })
    }

    /// Corrects a standalone income or expense. A new amount is in the wallet's currency.
    pub fn edit(&self, request: EditRequest) -> Result<Transaction, ActionError> {
        let amount = request.amount.as_deref().map(parse_amount).transpose()?;
        let created_at = request.created_at.as_deref().map(parse_created_at).transpose()?;
        let rates = match amount {
            Some(_) => Some(self.currencies.details()?),
            None => None
        };

        self.storage.atomically(|unit| -> Result<_, ActionError> {
            let original = unit.transaction(request.transaction_id)
                .ok_or_else(|| ActionError::transaction_not_found(request.transaction_id))?;
            let mut wallet = unit.wallet(original.wallet_id)
                .ok_or_else(|| ActionError::wallet_not_found(original.wallet_id))?;

            let references = unit.references_to(original.transaction_id);
            let denial = edit_denial(&original, &references, request.user, |wallet_id| {
                unit.wallet(wallet_id).map(|wallet| wallet.owner)
            });

            if let Some(reason) = denial {
                return Err(ActionError::EditForbidden { transaction_id: original.transaction_id, reason })
            }

            let mut edited = original.clone();

            if let (Some(amount), Some(rates)) = (amount, &rates) {
                check_amount(amount, rates.get(&wallet.currency)?)?;
                edited.amount = amount;
            }

            if let Some(description) = request.description {
                edited = edited.with_description(Some(description));
            }

            if let Some(created_at) = created_at {
                edited = edited.with_created_at(created_at);
            }

            wallet.replace(&original, &edited)?;

            unit.put_wallet(wallet);
            unit.put_transaction(edited.clone());

            Ok(edited)
        })
    }

    /// Removes rows and undoes their balance effect. Both legs of a transfer go together.
    pub fn delete(&self, request: DeleteRequest) -> Result<Vec<Transaction>, ActionError> {
        if request.transaction_ids.is_empty() {
            return Err(ActionError::missing("transaction"))
        }

        self.storage.atomically(|unit| -> Result<_, ActionError> {
            for &transaction_id in &request.transaction_ids {
                let owned = unit.transaction(transaction_id)
                    .and_then(|transaction| unit.wallet(transaction.wallet_id))
                    .is_some_and(|wallet| wallet.owner == request.user);

                if !owned {
                    return Err(ActionError::transaction_not_found(transaction_id))
                }
            }

            let mut pending: Vec<TransactionId> = request.transaction_ids.iter().rev().copied().collect();
            let mut deleted = Vec::new();

            while let Some(transaction_id) = pending.pop() {
                // Already removed as the partner of an earlier leg.
                let Some(transaction) = unit.transaction(transaction_id) else {
                    continue;
                };

                let mut wallet = unit.wallet(transaction.wallet_id)
                    .ok_or_else(|| ActionError::wallet_not_found(transaction.wallet_id))?;

                wallet.revert(&transaction)?;

                unit.put_wallet(wallet);
                unit.remove_transaction(transaction_id);

                pending.extend(transaction.reference_id);
                pending.extend(unit.references_to(transaction_id).iter().map(|reference| reference.transaction_id));

                deleted.push(transaction);
            }

            Ok(deleted)
        })
    }

    /// Whether `user` may edit the transaction.
    pub fn can_edit(&self, user: UserId, transaction_id: TransactionId) -> Result<bool, ActionError> {
        let transaction = self.storage.load_transaction(transaction_id)
            .ok_or_else(|| ActionError::transaction_not_found(transaction_id))?;
        let references = self.storage.find_references(transaction_id);

        let denial = edit_denial(&transaction, &references, user, |wallet_id| {
            self.storage.load_wallet(wallet_id).map(|wallet| wallet.owner)
        });

        Ok(denial.is_none())
    }

    /// Matching rows, newest first. Rows created at the same instant are ordered by id, highest first.
    pub fn list(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let mut transactions: Vec<Transaction> = self.storage.transactions()
            .into_iter()
            .filter(|transaction| filter.matches(transaction))
            .collect();

        transactions.sort_by(|left, right| {
            right.created_at.cmp(&left.created_at)
                .then(right.transaction_id.cmp(&left.transaction_id))
        });

        transactions
    }

    pub fn rows(&self, filter: &TransactionFilter) -> Result<Vec<TransactionRow>, ActionError> {
        let rates = self.currencies.details()?;
        let wallets: HashMap<WalletId, Wallet> = self.storage.wallets()
            .into_iter()
            .map(|wallet| (wallet.wallet_id, wallet))
            .collect();

        self.list(filter)
            .iter()
            .map(|transaction| -> Result<_, ActionError> {
                let wallet = wallets.get(&transaction.wallet_id)
                    .ok_or_else(|| ActionError::wallet_not_found(transaction.wallet_id))?;

                Ok(TransactionRow::new(transaction, wallet, rates.get(&wallet.currency)?))
            })
            .collect()
    }

    /// The detail view of one transaction.
    pub fn show(&self, transaction_id: TransactionId) -> Result<TransactionRow, ActionError> {
        let transaction = self.storage.load_transaction(transaction_id)
            .ok_or_else(|| ActionError::transaction_not_found(transaction_id))?;
        let wallet = self.storage.load_wallet(transaction.wallet_id)
            .ok_or_else(|| ActionError::wallet_not_found(transaction.wallet_id))?;
        let currency = self.currencies.detail(&wallet.currency)?;

        Ok(TransactionRow::new(&transaction, &wallet, &currency))
    }

    pub fn wallet_rows(&self) -> Vec<WalletRow> {
        self.storage.wallets().iter().map(WalletRow::from).collect()
    }

    /// Distinct descriptions already used on the user's wallets, sorted.
    pub fn descriptions(&self, user: UserId) -> Vec<String> {
        let owned: BTreeSet<WalletId> = self.storage.wallets()
            .into_iter()
            .filter(|wallet| wallet.owner == user)
            .map(|wallet| wallet.wallet_id)
            .collect();

        self.storage.transactions()
            .into_iter()
            .filter(|transaction| owned.contains(&transaction.wallet_id))
            .filter_map(|transaction| transaction.description)
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// Select options for the user's wallets in the form `Name (CODE)`.
    pub fn wallet_options(&self, user: UserId) -> Vec<(WalletId, String)> {
        self.storage.wallets()
            .into_iter()
            .filter(|wallet| wallet.owner == user)
            .map(|wallet| (wallet.wallet_id, format!("{} ({})", wallet.name, wallet.currency)))
            .collect()
    }

    pub fn currency_options(&self) -> Result<Vec<(CurrencyCode, String)>, ActionError> {
        Ok(self.currencies.details()?.options())
    }
}

fn owned_wallet<S: Storage>(unit: &UnitOfWork<'_, S>, wallet_id: WalletId, user: UserId) -> Result<Wallet, ActionError> {
    unit.wallet(wallet_id)
        .filter(|wallet| wallet.owner == user)
        .ok_or_else(|| ActionError::wallet_not_found(wallet_id))
}

/// Why `user` may not edit `transaction`, if anything stops them.
///
/// `references` are the rows pointing at `transaction`; `owner_of` resolves a wallet's owner.
fn edit_denial(
    transaction: &Transaction,
    references: &[Transaction],
    user: UserId,
    owner_of: impl Fn(WalletId) -> Option<UserId>
) -> Option<&'static str> {
    if owner_of(transaction.wallet_id) != Some(user) {
        return Some("it belongs to another user")
    }

    if transaction.is_transfer_leg() {
        return Some("it is part of a transfer")
    }

    if references.iter().any(|reference| owner_of(reference.wallet_id) == Some(user)) {
        return Some("another transaction of the user references it")
    }

    None
}

fn parse_amount(value: &str) -> Result<Decimal, ActionError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ActionError::missing("amount"))
    }

    Decimal::from_str(value).map_err(|error| ActionError::validation("amount", error))
}

/// A blank currency means "use the wallet's".
fn parse_currency(value: Option<&str>) -> Result<Option<CurrencyCode>, ActionError> {
    match value.map(str::trim).filter(|code| !code.is_empty()) {
        None => Ok(None),
        Some(code) => CurrencyCode::from_str(code)
            .map(Some)
            .map_err(|error| ActionError::validation("currency", error))
    }
}

fn parse_created_at(value: &str) -> Result<DateTime<Utc>, ActionError> {
    parse_timestamp(value)
        .ok_or_else(|| ActionError::validation("created_at", format!("expected {TIMESTAMP_FORMAT} or RFC 3339")))
}

fn check_amount(amount: Decimal, currency: &CurrencyDetail) -> Result<(), ActionError> {
    if amount <= Decimal::ZERO {
        return Err(ActionError::InvalidAmount {
            amount,
            currency: currency.code.clone(),
            reason: "must be positive"
        })
    }

    if amount.normalize().scale() > currency.minor_units {
        return Err(ActionError::InvalidAmount {
            amount,
            currency: currency.code.clone(),
            reason: "has more decimal places than the currency allows"
        })
    }

    Ok(())
}
