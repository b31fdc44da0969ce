use crate::types::errors::CurrencyCodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 5;

/// ISO-like currency code such as `USD` or `IDR`.
///
/// Codes are trimmed and upper-cased on parse so `" idr"` and `"IDR"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(CurrencyCodeError::Empty);
        }

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&value.len()) {
            return Err(CurrencyCodeError::InvalidLength(value.to_string()));
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CurrencyCodeError::InvalidCharacter(value.to_string()));
        }

        Ok(CurrencyCode(value.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}
