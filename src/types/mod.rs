mod currency_code;
mod errors;

pub use currency_code::CurrencyCode;
pub use errors::CurrencyCodeError;

pub type WalletId = u32;
pub type TransactionId = u64;
pub type UserId = u32;
