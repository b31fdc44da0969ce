use crate::models::{Transaction, Wallet};
use crate::storage::errors::StorageError;
use crate::storage::unit_of_work::Changeset;
use crate::storage::{Storage, UnitOfWork};
use crate::types::{TransactionId, WalletId};
use csv::{ReaderBuilder, Trim};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// In-memory ledger tables.
///
/// Commits hold the write side of `commit_lock` so snapshots, which take the read side,
/// never observe half of a unit of work.
pub struct LedgerStorage {
    wallets: DashMap<WalletId, Wallet>,
    transactions: DashMap<TransactionId, Transaction>,
    sequence: AtomicU64,
    commit_lock: RwLock<()>
}

impl LedgerStorage {
    pub fn new() -> Self {
        Self {
            wallets: DashMap::new(),
            transactions: DashMap::new(),
            sequence: AtomicU64::new(0),
            commit_lock: RwLock::new(())
        }
    }

    /// Seeds a store from `id,owner,name,currency,balance,overdraft` rows.
    pub fn from_csv(path: &Path) -> Result<Self, StorageError> {
        let storage = Self::new();

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(path)
            .map_err(|error| StorageError::csv(path, error))?;

        for result in reader.deserialize::<Wallet>() {
            let wallet = result.map_err(|error| StorageError::csv(path, error))?;
            storage.insert_wallet(wallet)?;
        }

        debug!("Loaded [{}] wallets from {}", storage.wallets.len(), path.display());

        Ok(storage)
    }

    fn commit(&self, changes: Changeset) {
        for (wallet_id, wallet) in changes.wallets {
            self.wallets.insert(wallet_id, wallet);
        }

        for (transaction_id, staged) in changes.transactions {
            match staged {
                Some(transaction) => {
                    self.transactions.insert(transaction_id, transaction);
                }
                None => {
                    self.transactions.remove(&transaction_id);
                }
            }
        }
    }
}

impl Default for LedgerStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LedgerStorage {
    fn load_wallet(&self, wallet_id: WalletId) -> Option<Wallet> {
        self.wallets.get(&wallet_id).map(|entry| entry.value().clone())
    }

    fn load_transaction(&self, transaction_id: TransactionId) -> Option<Transaction> {
        self.transactions.get(&transaction_id).map(|entry| entry.value().clone())
    }

    fn find_references(&self, transaction_id: TransactionId) -> Vec<Transaction> {
        self.transactions.iter()
            .filter(|entry| entry.value().reference_id == Some(transaction_id))
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn wallets(&self) -> Vec<Wallet> {
        let _guard = self.commit_lock.read().unwrap_or_else(PoisonError::into_inner);

        let mut wallets: Vec<Wallet> = self.wallets.iter().map(|entry| entry.value().clone()).collect();
        wallets.sort_by_key(|wallet| wallet.wallet_id);
        wallets
    }

    fn transactions(&self) -> Vec<Transaction> {
        let _guard = self.commit_lock.read().unwrap_or_else(PoisonError::into_inner);

        let mut transactions: Vec<Transaction> = self.transactions.iter().map(|entry| entry.value().clone()).collect();
        transactions.sort_by_key(|transaction| transaction.transaction_id);
        transactions
    }

    fn next_transaction_id(&self) -> TransactionId {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn insert_wallet(&self, wallet: Wallet) -> Result<(), StorageError> {
        let _guard = self.commit_lock.write().unwrap_or_else(PoisonError::into_inner);

        match self.wallets.entry(wallet.wallet_id) {
            Entry::Occupied(_) => Err(StorageError::DuplicateWallet { wallet_id: wallet.wallet_id }),
            Entry::Vacant(slot) => {
                slot.insert(wallet);
                Ok(())
            }
        }
    }

    fn atomically<T, E>(&self, work: impl FnOnce(&mut UnitOfWork<'_, Self>) -> Result<T, E>) -> Result<T, E> {
        let _guard = self.commit_lock.write().unwrap_or_else(PoisonError::into_inner);

        let mut unit = UnitOfWork::new(self);
        let value = work(&mut unit)?;

        self.commit(unit.into_changeset());

        Ok(value)
    }
}
