//! Currency details and conversion.
//!
//! Rates are expressed against a common base unit: a [`CurrencyDetail::rate`] of `15000`
//! means one base unit buys 15000 of that currency. Converting between two currencies
//! goes through the base unit and rounds half-up to the target's minor units.

mod cached;
mod csv_source;
mod errors;
mod rate_table;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::CurrencyCode;

pub use cached::CachedCurrencyRepository;
pub use csv_source::CsvRateSource;
pub use errors::CurrencyError;
pub use rate_table::RateTable;

/// A single row of the rate table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrencyDetail {
    pub code: CurrencyCode,
    pub name: String,
    /// Units of this currency per one base unit.
    pub rate: Decimal,
    /// Number of fraction digits of the smallest denomination.
    pub minor_units: u32
}

/// Read access to the current exchange rates.
pub trait CurrencyRepository: Send + Sync + 'static {
    /// Returns every known currency, keyed by code.
    fn details(&self) -> Result<Arc<RateTable>, CurrencyError>;

    fn detail(&self, code: &CurrencyCode) -> Result<CurrencyDetail, CurrencyError> {
        self.details()?.get(code).cloned()
    }

    fn convert(&self, amount: Decimal, from: &CurrencyCode, to: &CurrencyCode) -> Result<Decimal, CurrencyError> {
        RateTable::convert(&*self.details()?, amount, from, to)
    }
}

/// Somewhere a fresh [`RateTable`] can be loaded from.
pub trait RateSource: Send + Sync + 'static {
    fn load(&self) -> Result<RateTable, CurrencyError>;
}

impl CurrencyRepository for Arc<RateTable> {
    fn details(&self) -> Result<Arc<RateTable>, CurrencyError> {
        Ok(Arc::clone(self))
    }
}

impl RateSource for RateTable {
    fn load(&self) -> Result<RateTable, CurrencyError> {
        Ok(self.clone())
    }
}
