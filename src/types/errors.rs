use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurrencyCodeError {
    #[error("Currency code error: Value is an empty string")]
    Empty,
    #[error("Currency code error: [{0}] must be between 3 and 5 characters")]
    InvalidLength(String),
    #[error("Currency code error: [{0}] must only contain ASCII letters and digits")]
    InvalidCharacter(String)
}
