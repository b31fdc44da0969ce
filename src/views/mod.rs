//! Presentation of ledger rows: table and detail rows, filters and text formatting.

mod filter;
mod format;
mod rows;

pub use filter::TransactionFilter;
pub use format::{format_amount, format_timestamp, parse_timestamp, TIMESTAMP_FORMAT};
pub use rows::{BadgeColor, TransactionRow, WalletRow};
