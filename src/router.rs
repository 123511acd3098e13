use crate::errors::{ResultResp, ServerError};
use crate::responses::{error_to_response, json_response, preflight_response};
use crate::routes;
use crate::state::AppState;
use astra::{Request, Response};
use serde_json::json;
use std::collections::HashMap;

/// Route one request and render any error, logging the outcome.
pub fn respond(req: Request, state: &AppState) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    };

    tracing::info!(%method, %path, status = resp.status().as_u16(), "request");
    resp
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = parse_query(&req);

    match (method, path) {
        ("OPTIONS", _) => preflight_response(
            req.headers()
                .get("Access-Control-Request-Headers")
                .and_then(|v| v.to_str().ok()),
        ),
        ("GET", "/health") => json_response(200, &json!({ "status": "ok" })),
        ("GET", "/docs") | ("GET", "/docs/") => routes::docs::swagger_ui(),
        ("GET", routes::docs::DOCUMENT_PATH) => routes::docs::openapi_document(),
        ("GET", "/properties") => routes::properties::list_properties(&params, state),
        ("GET", p) if p.starts_with("/property/") => {
            routes::properties::property_detail(&p["/property/".len()..], &params, state)
        }
        ("GET", p) if p.starts_with("/demographics/") => {
            routes::demographics::zip_demographics(&p["/demographics/".len()..], state)
        }
        _ => Err(ServerError::not_found()),
    }
}

/// Decoded query string. Later duplicates win.
fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
