mod errors;
mod ledger_storage;
mod unit_of_work;

use crate::models::{Transaction, Wallet};
use crate::types::{TransactionId, WalletId};

pub use errors::StorageError;
pub use ledger_storage::LedgerStorage;
pub use unit_of_work::UnitOfWork;

/// Wallet and transaction tables.
///
/// Point lookups never block. `wallets` and `transactions` return a consistent snapshot, and
/// `atomically` is the only way to change anything once the store is seeded.
pub trait Storage: Send + Sync + 'static {
    fn load_wallet(&self, wallet_id: WalletId) -> Option<Wallet>;
    fn load_transaction(&self, transaction_id: TransactionId) -> Option<Transaction>;

    /// Every committed row whose `reference_id` is `transaction_id`.
    fn find_references(&self, transaction_id: TransactionId) -> Vec<Transaction>;

    fn wallets(&self) -> Vec<Wallet>;
    fn transactions(&self) -> Vec<Transaction>;

    fn next_transaction_id(&self) -> TransactionId;

    /// Registers a wallet outside of any unit of work.
    fn insert_wallet(&self, wallet: Wallet) -> Result<(), StorageError>;

    /// Runs `work` against a staged view of the store and commits its changes only if it succeeds.
    fn atomically<T, E>(&self, work: impl FnOnce(&mut UnitOfWork<'_, Self>) -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized;
}
