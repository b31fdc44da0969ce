use std::path::PathBuf;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::currency::{CurrencyDetail, CurrencyError, RateSource, RateTable};

/// Reads `code,name,rate,minor_units` rows from a CSV file on every load.
pub struct CsvRateSource {
    path: PathBuf
}

impl CsvRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RateSource for CsvRateSource {
    fn load(&self) -> Result<RateTable, CurrencyError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(|error| CurrencyError::source(&self.path, error))?;

        let details = reader.deserialize::<CurrencyDetail>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| CurrencyError::source(&self.path, error))?;

        debug!("Loaded [{}] currencies from {}", details.len(), self.path.display());

        RateTable::new(details)
    }
}
