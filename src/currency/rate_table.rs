use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::currency::{CurrencyDetail, CurrencyError};
use crate::types::CurrencyCode;

const MAX_MINOR_UNITS: u32 = 18;

/// Validated, immutable set of currency details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    currencies: BTreeMap<CurrencyCode, CurrencyDetail>
}

impl RateTable {
    /// Builds a table, rejecting duplicate codes, non-positive rates and unrepresentable precisions.
    pub fn new(details: impl IntoIterator<Item = CurrencyDetail>) -> Result<Self, CurrencyError> {
        let mut currencies = BTreeMap::new();

        for detail in details {
            if detail.rate <= Decimal::ZERO {
                return Err(CurrencyError::InvalidRate { code: detail.code, rate: detail.rate });
            }

            if detail.minor_units > MAX_MINOR_UNITS {
                return Err(CurrencyError::InvalidMinorUnits { code: detail.code, minor_units: detail.minor_units });
            }

            match currencies.entry(detail.code.clone()) {
                Entry::Occupied(_) => return Err(CurrencyError::DuplicateCurrency { code: detail.code }),
                Entry::Vacant(slot) => {
                    slot.insert(detail);
                }
            }
        }

        Ok(Self { currencies })
    }

    pub fn get(&self, code: &CurrencyCode) -> Result<&CurrencyDetail, CurrencyError> {
        self.currencies.get(code)
            .ok_or_else(|| CurrencyError::unknown_currency(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyDetail> {
        self.currencies.values()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Select options in the form `Name (CODE)`, ordered by code.
    pub fn options(&self) -> Vec<(CurrencyCode, String)> {
        self.iter()
            .map(|detail| (detail.code.clone(), format!("{} ({})", detail.name, detail.code)))
            .collect()
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Both codes must be known. Converting a currency to itself returns `amount` untouched;
    /// any other conversion is rounded half away from zero to the target's minor units.
    pub fn convert(&self, amount: Decimal, from: &CurrencyCode, to: &CurrencyCode) -> Result<Decimal, CurrencyError> {
        let source = self.get(from)?;
        let target = self.get(to)?;

        if source.code == target.code {
            return Ok(amount);
        }

        let converted = amount.checked_mul(target.rate)
            .and_then(|value| value.checked_div(source.rate))
            .ok_or_else(|| CurrencyError::overflow(amount, from, to))?;

        Ok(converted.round_dp_with_strategy(target.minor_units, RoundingStrategy::MidpointAwayFromZero))
    }
}
