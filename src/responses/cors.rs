//! Any origin may read API responses.

use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
const ALLOWED_METHODS: &str = "GET,HEAD,OPTIONS";

pub fn allow_any_origin(builder: ResponseBuilder) -> ResponseBuilder {
    builder.header(ALLOW_ORIGIN, "*")
}

/// `204` answer to a preflight. Requested headers are echoed back as allowed.
pub fn preflight_response(requested_headers: Option<&str>) -> ResultResp {
    let mut builder = allow_any_origin(ResponseBuilder::new().status(204))
        .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
        .header("Vary", "Access-Control-Request-Headers")
        .header("Content-Length", "0");

    if let Some(headers) = requested_headers {
        builder = builder.header("Access-Control-Allow-Headers", headers);
    }

    builder
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
