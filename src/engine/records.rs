use serde::Deserialize;

use crate::actions::{Action, ActionError, DeleteRequest, EditRequest, EntryRequest, TransferRequest};
use crate::types::{TransactionId, UserId, WalletId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Income,
    Expense,
    Transfer,
    Edit,
    Delete
}

/// One row of a requests file:
/// `action,user,wallet,destination,amount,currency,description,transaction,created_at`.
///
/// Only the columns an action needs are read. `transaction` holds a single id for edits and a
/// `;` separated list for deletes.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestRecord {
    pub action: ActionKind,
    pub user: UserId,
    pub wallet: Option<WalletId>,
    pub destination: Option<WalletId>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub transaction: Option<String>,
    pub created_at: Option<String>
}

impl RequestRecord {
    pub fn into_action(self) -> Result<Action, ActionError> {
        let action = match self.action {
            ActionKind::Income => Action::Income(self.into_entry()?),
            ActionKind::Expense => Action::Expense(self.into_entry()?),
            ActionKind::Transfer => Action::Transfer(TransferRequest {
                user: self.user,
                origin_id: self.wallet.ok_or_else(|| ActionError::missing("wallet"))?,
                destination_id: self.destination.ok_or_else(|| ActionError::missing("destination"))?,
                amount: self.amount.unwrap_or_default(),
                description: self.description
            }),
            ActionKind::Edit => Action::Edit(EditRequest {
                user: self.user,
                transaction_id: parse_transaction_id(self.transaction.as_deref().unwrap_or_default())?,
                amount: self.amount,
                description: self.description,
                created_at: self.created_at
            }),
            ActionKind::Delete => Action::Delete(DeleteRequest {
                user: self.user,
                transaction_ids: self.transaction.as_deref()
                    .unwrap_or_default()
                    .split(';')
                    .filter(|id| !id.trim().is_empty())
                    .map(parse_transaction_id)
                    .collect::<Result<_, _>>()?
            })
        };

        Ok(action)
    }

    fn into_entry(self) -> Result<EntryRequest, ActionError> {
        Ok(EntryRequest {
            user: self.user,
            wallet_id: self.wallet.ok_or_else(|| ActionError::missing("wallet"))?,
            amount: self.amount.unwrap_or_default(),
            currency: self.currency,
            description: self.description
        })
    }
}

fn parse_transaction_id(value: &str) -> Result<TransactionId, ActionError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ActionError::missing("transaction"))
    }

    value.parse().map_err(|error| ActionError::validation("transaction", error))
}
