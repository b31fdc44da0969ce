//! Ledger actions: income, expense, transfer, edit and delete, plus the read-side queries
//! used to present the ledger.

mod dispatcher;
mod errors;
mod requests;

pub use dispatcher::TransactionActions;
pub use errors::ActionError;
pub use requests::{Action, DeleteRequest, EditRequest, EntryRequest, Outcome, TransferRequest};
