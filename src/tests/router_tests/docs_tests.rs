use super::TestApp;
use crate::responses::cors::ALLOW_ORIGIN;
use crate::tests::fakes::ScriptedFetcher;
use crate::tests::utils::{body_json, body_text, listing};
use http::Method;

#[test]
fn docs_page_serves_swagger_ui() {
    let app = TestApp::new(ScriptedFetcher::default(), &[]);

    let resp = app.get("/docs");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "text/html; charset=utf-8"
    );
    let page = body_text(resp);
    assert!(page.contains("swagger-ui"));
    assert!(page.contains("/docs/json"));
}

#[test]
fn openapi_document_is_served_as_json() {
    let app = TestApp::new(ScriptedFetcher::default(), &[]);

    let resp = app.get("/docs/json");

    assert_eq!(resp.status(), 200);
    let doc = body_json(resp);
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert!(doc["paths"]["/demographics/{zip}"]["get"].is_object());
}

#[test]
fn json_responses_allow_any_origin() {
    let app = TestApp::new(
        ScriptedFetcher::default(),
        &[listing("for_sale", 100000.0, "10001")],
    );

    let ok = app.get("/properties?status=for_sale");
    assert_eq!(ok.status(), 200);
    assert_eq!(ok.headers().get(ALLOW_ORIGIN).unwrap(), "*");

    let bad = app.get("/properties");
    assert_eq!(bad.status(), 400);
    assert_eq!(bad.headers().get(ALLOW_ORIGIN).unwrap(), "*");

    let missing = app.get("/nope");
    assert_eq!(missing.status(), 404);
    assert_eq!(missing.headers().get(ALLOW_ORIGIN).unwrap(), "*");
}

#[test]
fn preflight_is_answered_without_touching_handlers() {
    let app = TestApp::new(ScriptedFetcher::default(), &[]);

    let resp = app.request(
        Method::OPTIONS,
        "/demographics/10001",
        &[
            ("Origin", "https://example.org"),
            ("Access-Control-Request-Method", "GET"),
            ("Access-Control-Request-Headers", "content-type"),
        ],
    );

    assert_eq!(resp.status(), 204);
    let headers = resp.headers();
    assert_eq!(headers.get(ALLOW_ORIGIN).unwrap(), "*");
    assert!(headers
        .get("Access-Control-Allow-Methods")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("GET"));
    assert_eq!(headers.get("Access-Control-Allow-Headers").unwrap(), "content-type");
    assert_eq!(app.fetcher.fetch_calls(), 0);
    assert_eq!(app.store.calls(), 0);
}
