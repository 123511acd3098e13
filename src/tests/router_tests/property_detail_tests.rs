use super::TestApp;
use crate::demographics::DemographicRecord;
use crate::tests::fakes::ScriptedFetcher;
use crate::tests::utils::{body_json, listing};

fn demographics() -> DemographicRecord {
    DemographicRecord {
        zip_code: String::new(),
        median_income: Some(85000.0),
        population: Some(21000.0),
        median_age: Some(34.0),
    }
}

#[test]
fn unknown_id_is_not_found_without_fetching() {
    let app = TestApp::new(
        ScriptedFetcher::default().with_record(demographics()),
        &[listing("for_sale", 1.0, "10001")],
    );

    let resp = app.get("/property/999999?include_zip_info=true");

    assert_eq!(resp.status(), 404);
    assert_eq!(app.fetcher.fetch_calls(), 0);
}

#[test]
fn non_numeric_id_is_not_found() {
    let app = TestApp::new(ScriptedFetcher::default(), &[]);

    assert_eq!(app.get("/property/abc").status(), 404);
    assert_eq!(app.get("/property/").status(), 404);
}

#[test]
fn detail_omits_zip_info_unless_requested() {
    let app = TestApp::new(
        ScriptedFetcher::default().with_record(demographics()),
        &[listing("for_sale", 300000.0, "10001")],
    );

    let body = body_json(app.get("/property/1"));

    assert_eq!(body["id"], 1);
    assert_eq!(body["price_per_sq_ft"], 200.0);
    assert!(body.get("zip_info").is_none());
    assert_eq!(app.fetcher.fetch_calls(), 0);
}

#[test]
fn detail_attaches_zip_info_and_caches_it() {
    let app = TestApp::new(
        ScriptedFetcher::default().with_record(demographics()),
        &[listing("for_sale", 300000.0, "10001")],
    );

    let first = body_json(app.get("/property/1?include_zip_info=true"));
    let second = body_json(app.get("/property/1?include_zip_info=true"));

    assert_eq!(first["zip_info"]["zip_code"], "10001");
    assert_eq!(first["zip_info"]["median_income"], 85000.0);
    assert_eq!(second["zip_info"], first["zip_info"]);
    assert_eq!(app.fetcher.fetch_calls(), 1);
}

#[test]
fn failed_augmentation_is_null_not_an_error() {
    let app = TestApp::new(ScriptedFetcher::default(), &[listing("sold", 1.0, "10001")]);

    let resp = app.get("/property/1?include_zip_info=true");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert!(body["zip_info"].is_null());
    assert!(body.get("zip_info").is_some());
}
