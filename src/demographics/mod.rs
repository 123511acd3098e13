mod fetch_error;
pub mod fetcher;
mod models;
mod service;

pub use fetch_error::FetchError;
pub use fetcher::{DemographicFetcher, ZipWhoFetcher};
pub use models::{is_valid_zip, DemographicFilterSpec, DemographicRecord, Metric};
pub use service::DemographicService;
