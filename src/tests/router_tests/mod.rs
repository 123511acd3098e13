mod demographics_tests;
mod docs_tests;
mod properties_tests;
mod property_detail_tests;

use crate::db::connection::Database;
use crate::db::properties::{insert_properties, SqlitePropertyStore};
use crate::db::zip_cache::SqliteDemographicStore;
use crate::demographics::DemographicService;
use crate::domain::property::NewProperty;
use crate::router::respond;
use crate::state::AppState;
use crate::tests::fakes::{CountingPropertyStore, ScriptedFetcher};
use crate::tests::utils::init_test_db;
use astra::{Body, Response};
use http::{Method, Request};
use std::sync::Arc;
use tempfile::TempDir;

/// Router wired to a temp SQLite file, a scripted fetcher, and a counting store.
pub struct TestApp {
    _dir: TempDir,
    pub db: Database,
    pub state: AppState,
    pub store: Arc<CountingPropertyStore>,
    pub fetcher: Arc<ScriptedFetcher>,
}

impl TestApp {
    pub fn new(fetcher: ScriptedFetcher, listings: &[NewProperty]) -> Self {
        let (dir, db) = init_test_db();
        insert_properties(&db, listings).expect("Failed to seed listings");

        let store = Arc::new(CountingPropertyStore::new(SqlitePropertyStore::new(db.clone())));
        let fetcher = Arc::new(fetcher);
        let demographics = DemographicService::new(
            Arc::new(SqliteDemographicStore::new(db.clone())),
            fetcher.clone(),
        );

        Self {
            _dir: dir,
            db,
            state: AppState::new(store.clone(), demographics),
            store,
            fetcher,
        }
    }

    /// GET through the same entry point the server uses.
    pub fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, &[])
    }

    pub fn request(&self, method: Method, uri: &str, headers: &[(&str, &str)]) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let req = builder.body(Body::empty()).unwrap();

        respond(req, &self.state)
    }
}
