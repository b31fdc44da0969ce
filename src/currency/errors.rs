use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::CurrencyCode;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Unknown currency [{code}]")]
    UnknownCurrency {
        code: CurrencyCode
    },
    #[error("Currency [{code}] has a non-positive rate [{rate}]")]
    InvalidRate {
        code: CurrencyCode,
        rate: Decimal
    },
    #[error("Currency [{code}] has too many minor units [{minor_units}]")]
    InvalidMinorUnits {
        code: CurrencyCode,
        minor_units: u32
    },
    #[error("Currency [{code}] is listed more than once")]
    DuplicateCurrency {
        code: CurrencyCode
    },
    #[error("Numeric overflow converting [{amount}] from [{from}] to [{to}]")]
    Overflow {
        amount: Decimal,
        from: CurrencyCode,
        to: CurrencyCode
    },
    #[error("Currency rates could not be read from [{path}]: {reason}")]
    Source {
        path: String,
        reason: String
    }
}

impl CurrencyError {
    pub fn unknown_currency(code: &CurrencyCode) -> Self {
        Self::UnknownCurrency { code: code.clone() }
    }

    pub fn overflow(amount: Decimal, from: &CurrencyCode, to: &CurrencyCode) -> Self {
        Self::Overflow {
            amount,
            from: from.clone(),
            to: to.clone()
        }
    }

    pub fn source(path: &Path, reason: impl ToString) -> Self {
        Self::Source {
            path: path.display().to_string(),
            reason: reason.to_string()
        }
    }
}
