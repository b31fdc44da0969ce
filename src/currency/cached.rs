use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use crate::currency::{CurrencyError, CurrencyRepository, RateSource, RateTable};

/// Serves a [`RateTable`] from a [`RateSource`], reloading it once the cached copy expires.
pub struct CachedCurrencyRepository<S: RateSource> {
    source: S,
    cache: Cache<(), Arc<RateTable>>
}

impl<S: RateSource> CachedCurrencyRepository<S> {
    pub fn new(source: S, time_to_live: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(time_to_live)
            .build();

        Self { source, cache }
    }

    /// Drops the cached table so the next lookup reads the source again.
    pub fn refresh(&self) {
        self.cache.invalidate_all();
    }
}

impl<S: RateSource> CurrencyRepository for CachedCurrencyRepository<S> {
    fn details(&self) -> Result<Arc<RateTable>, CurrencyError> {
        self.cache
            .try_get_with((), || {
                debug!("Currency rate cache miss, loading rates");
                self.source.load().map(Arc::new)
            })
            .map_err(|error| (*error).clone())
    }
}
