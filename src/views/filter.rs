use crate::models::{DisplayType, Transaction, TransactionType};
use crate::types::WalletId;

/// Table filters. An unset field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// `Transfer` matches any row with a reference; `Income`/`Expense` match the stored type.
    pub display_type: Option<DisplayType>,
    pub wallet_id: Option<WalletId>
}

impl TransactionFilter {
    pub fn by_type(display_type: DisplayType) -> Self {
        Self { display_type: Some(display_type), ..Self::default() }
    }

    pub fn by_wallet(wallet_id: WalletId) -> Self {
        Self { wallet_id: Some(wallet_id), ..Self::default() }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        let type_matches = match self.display_type {
            None => true,
            Some(DisplayType::Transfer) => transaction.is_transfer_leg(),
            Some(DisplayType::Income) => transaction.transaction_type == TransactionType::Income,
            Some(DisplayType::Expense) => transaction.transaction_type == TransactionType::Expense
        };

        let wallet_matches = self.wallet_id
            .is_none_or(|wallet_id| wallet_id == transaction.wallet_id);

        type_matches && wallet_matches
    }
}
