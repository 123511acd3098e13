use super::TestApp;
use crate::tests::fakes::ScriptedFetcher;
use crate::tests::utils::{body_json, listing};

fn seeded(fetcher: ScriptedFetcher) -> TestApp {
    TestApp::new(
        fetcher,
        &[
            listing("for_sale", 250000.0, "78701"),
            listing("for_sale", 300000.0, "78702"),
            listing("for_sale", 450000.0, "10001"),
            listing("sold", 300000.0, "78701"),
        ],
    )
}

#[test]
fn missing_status_is_bad_request() {
    let app = seeded(ScriptedFetcher::default());

    let resp = app.get("/properties?min_price=1");

    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "Status is required");
    assert_eq!(app.store.calls(), 0);
}

#[test]
fn filters_by_status_and_inclusive_price_range() {
    let app = seeded(ScriptedFetcher::default());

    let resp = app.get("/properties?status=for_sale&min_price=250000&max_price=300000");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    let prices: Vec<f64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![250000.0, 300000.0]);
    assert_eq!(body["info"]["total"], 2);
    assert_eq!(body["info"]["pages"], 1);
}

#[test]
fn limit_is_clamped_and_pages_follow() {
    let app = seeded(ScriptedFetcher::default());

    let body = body_json(app.get("/properties?status=for_sale&limit=0&page=2"));

    assert_eq!(body["info"]["limit"], 1);
    assert_eq!(body["info"]["page"], 2);
    assert_eq!(body["info"]["pages"], 3);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["zip_code"], "78702");
}

#[test]
fn demographic_zips_narrow_the_results() {
    let app = seeded(ScriptedFetcher::default().with_zips(&["78701", "99999"]));

    let body = body_json(
        app.get("/properties?status=for_sale&state_code=tx&min_median_income=60000"),
    );

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["zip_code"], "78701");

    let spec = app.fetcher.last_search().unwrap();
    assert_eq!(spec.state_code, "TX");
    assert_eq!(
        spec.to_filter_param(),
        "MedianIncome-60000-999999_Population-0-9999999_MedianAge-0-99"
    );
}

#[test]
fn no_matching_zips_short_circuits_without_store() {
    let app = seeded(ScriptedFetcher::default());

    let resp = app.get("/properties?status=for_sale&state_code=TX&max_population=500");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
    assert_eq!(body["info"]["total"], 0);
    assert_eq!(body["info"]["pages"], 0);
    assert_eq!(app.fetcher.search_calls(), 1);
    assert_eq!(app.store.calls(), 0);
}

#[test]
fn excluded_territory_ignores_demographic_filters() {
    let app = seeded(ScriptedFetcher::default());

    let body = body_json(app.get("/properties?status=for_sale&state_code=PR&min_population=1"));

    assert_eq!(body["results"].as_array().unwrap().len(), 3);
    assert_eq!(app.fetcher.search_calls(), 0);
}

#[test]
fn demographic_bounds_without_state_are_ignored() {
    let app = seeded(ScriptedFetcher::default());

    let body = body_json(app.get("/properties?status=sold&min_median_age=30"));

    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(app.fetcher.search_calls(), 0);
}

#[test]
fn non_numeric_filter_is_bad_request() {
    let app = seeded(ScriptedFetcher::default());

    let resp = app.get("/properties?status=for_sale&min_bed=three");

    assert_eq!(resp.status(), 400);
    assert_eq!(app.store.calls(), 0);
}
