use crate::db::properties::PropertyStore;
use crate::demographics::DemographicService;
use std::sync::Arc;

/// Everything a request handler needs. Shared by all worker threads.
#[derive(Clone)]
pub struct AppState {
    pub properties: Arc<dyn PropertyStore>,
    pub demographics: DemographicService,
}

impl AppState {
    pub fn new(properties: Arc<dyn PropertyStore>, demographics: DemographicService) -> Self {
        Self {
            properties,
            demographics,
        }
    }
}
