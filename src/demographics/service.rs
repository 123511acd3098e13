use crate::db::zip_cache::DemographicStore;
use crate::demographics::fetcher::DemographicFetcher;
use crate::demographics::models::{DemographicFilterSpec, DemographicRecord};
use crate::errors::ServerError;
use std::sync::Arc;

/// Cache-aside demographics lookups over a store and a fetcher.
#[derive(Clone)]
pub struct DemographicService {
    store: Arc<dyn DemographicStore>,
    fetcher: Arc<dyn DemographicFetcher>,
}

impl DemographicService {
    pub fn new(store: Arc<dyn DemographicStore>, fetcher: Arc<dyn DemographicFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Serve from the cache when possible, otherwise fetch and cache.
    ///
    /// A failed fetch is not cached, so the next call tries again.
    /// Store errors are returned as-is.
    pub fn get_demographics(&self, zip: &str) -> Result<Option<DemographicRecord>, ServerError> {
        if let Some(cached) = self.store.get(zip)? {
            tracing::debug!(zip, "zip demographics cache hit");
            return Ok(Some(cached));
        }

        match self.fetcher.fetch_by_zip(zip) {
            Some(record) => {
                self.store.put(&record)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Zips matching the demographic ranges. Never cached.
    pub fn search_zips_by_attributes(&self, spec: &DemographicFilterSpec) -> Vec<String> {
        self.fetcher.search_zips_by_filter(spec)
    }
}
