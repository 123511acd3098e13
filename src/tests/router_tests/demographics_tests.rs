use super::TestApp;
use crate::db::zip_cache::{DemographicStore, SqliteDemographicStore};
use crate::demographics::DemographicRecord;
use crate::tests::fakes::ScriptedFetcher;
use crate::tests::utils::body_json;

fn record(income: Option<f64>) -> DemographicRecord {
    DemographicRecord {
        zip_code: "10001".into(),
        median_income: income,
        population: Some(21000.0),
        median_age: Some(34.0),
    }
}

#[test]
fn returns_record_and_caches_it() {
    let app = TestApp::new(ScriptedFetcher::default().with_record(record(Some(85000.0))), &[]);

    let resp = app.get("/demographics/10001");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["zip_code"], "10001");
    assert_eq!(body["median_income"], 85000.0);
    assert_eq!(body["population"], 21000.0);
    assert_eq!(body["median_age"], 34.0);

    let cached = SqliteDemographicStore::new(app.db.clone()).get("10001").unwrap();
    assert_eq!(cached, Some(record(Some(85000.0))));

    assert_eq!(app.get("/demographics/10001").status(), 200);
    assert_eq!(app.fetcher.fetch_calls(), 1);
}

#[test]
fn missing_income_is_not_found() {
    let app = TestApp::new(ScriptedFetcher::default().with_record(record(None)), &[]);

    let resp = app.get("/demographics/10001");

    assert_eq!(resp.status(), 404);
    let body = body_json(resp);
    assert_eq!(body["zip"], "10001");
    assert!(body["error"].as_str().unwrap().contains("No demographic data"));
}

#[test]
fn provider_failure_is_not_found_and_retried() {
    let app = TestApp::new(ScriptedFetcher::default(), &[]);

    assert_eq!(app.get("/demographics/10001").status(), 404);
    assert_eq!(app.get("/demographics/10001").status(), 404);
    assert_eq!(app.fetcher.fetch_calls(), 2);
}

#[test]
fn malformed_zip_is_bad_request() {
    let app = TestApp::new(ScriptedFetcher::default(), &[]);

    assert_eq!(app.get("/demographics/1001").status(), 400);
    assert_eq!(app.get("/demographics/abcde").status(), 400);
    assert_eq!(app.fetcher.fetch_calls(), 0);
}

#[test]
fn unknown_route_is_not_found() {
    let app = TestApp::new(ScriptedFetcher::default(), &[]);

    let resp = app.get("/nope");
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp)["error"], "Not Found");
    assert_eq!(app.get("/health").status(), 200);
}
