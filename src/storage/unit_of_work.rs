use std::collections::{BTreeMap, HashMap};

use crate::models::{Transaction, Wallet};
use crate::storage::Storage;
use crate::types::{TransactionId, WalletId};

/// Staged changes of one action.
///
/// Reads see committed state overlaid with whatever this unit has already staged. Nothing
/// reaches the store until the owning [`Storage::atomically`] call commits the changeset.
pub struct UnitOfWork<'a, S: Storage> {
    storage: &'a S,
    wallets: HashMap<WalletId, Wallet>,
    /// `None` marks a staged deletion.
    transactions: BTreeMap<TransactionId, Option<Transaction>>
}

/// Everything a successful unit of work writes back.
#[derive(Debug, Default)]
pub(super) struct Changeset {
    pub(super) wallets: HashMap<WalletId, Wallet>,
    pub(super) transactions: BTreeMap<TransactionId, Option<Transaction>>
}

impl<'a, S: Storage> UnitOfWork<'a, S> {
    pub(super) fn new(storage: &'a S) -> Self {
        Self {
            storage,
            wallets: HashMap::new(),
            transactions: BTreeMap::new()
        }
    }

    pub(super) fn into_changeset(self) -> Changeset {
        Changeset {
            wallets: self.wallets,
            transactions: self.transactions
        }
    }

    pub fn wallet(&self, wallet_id: WalletId) -> Option<Wallet> {
        match self.wallets.get(&wallet_id) {
            Some(wallet) => Some(wallet.clone()),
            None => self.storage.load_wallet(wallet_id)
        }
    }

    pub fn put_wallet(&mut self, wallet: Wallet) {
        self.wallets.insert(wallet.wallet_id, wallet);
    }

    pub fn transaction(&self, transaction_id: TransactionId) -> Option<Transaction> {
        match self.transactions.get(&transaction_id) {
            Some(staged) => staged.clone(),
            None => self.storage.load_transaction(transaction_id)
        }
    }

    pub fn put_transaction(&mut self, transaction: Transaction) {
        self.transactions.insert(transaction.transaction_id, Some(transaction));
    }

    pub fn remove_transaction(&mut self, transaction_id: TransactionId) {
        self.transactions.insert(transaction_id, None);
    }

    /// Rows referencing `transaction_id`, including ones staged by this unit.
    pub fn references_to(&self, transaction_id: TransactionId) -> Vec<Transaction> {
        let committed = self.storage.find_references(transaction_id)
            .into_iter()
            .filter(|transaction| !self.transactions.contains_key(&transaction.transaction_id));

        let staged = self.transactions.values()
            .flatten()
            .filter(|transaction| transaction.reference_id == Some(transaction_id))
            .cloned();

        committed.chain(staged).collect()
    }

    pub fn next_transaction_id(&self) -> TransactionId {
        self.storage.next_transaction_id()
    }
}
