use std::path::Path;

use thiserror::Error;

use crate::types::WalletId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Wallet [{wallet_id}] is already registered")]
    DuplicateWallet {
        wallet_id: WalletId
    },
    #[error("Wallets could not be read from [{path}]: {source}")]
    Csv {
        path: String,
        source: csv::Error
    }
}

impl StorageError {
    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source
        }
    }
}
