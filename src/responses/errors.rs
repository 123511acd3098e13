use crate::errors::ServerError;
use crate::responses::cors::allow_any_origin;
use astra::{Body, Response, ResponseBuilder};
use http::StatusCode;
use serde::Serialize;

/// JSON body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Convert a ServerError into a JSON error response.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status_code();
    if status >= 500 {
        tracing::error!(error = %err, "request failed");
    }

    let message = match &err {
        ServerError::BadRequest(msg) | ServerError::NotFound(msg) => msg.clone(),
        // Storage details stay in the logs.
        ServerError::DbError(_) | ServerError::InternalError => "Internal Server Error".into(),
    };

    json_error_response(status, &message)
}

/// Build a `{"error": message}` response.
pub fn json_error_response(status: u16, message: &str) -> Response {
    let body = ErrorBody {
        error: message.to_string(),
    };

    serde_json::to_vec(&body)
        .ok()
        .and_then(|bytes| {
            allow_any_origin(ResponseBuilder::new().status(status))
                .header("Content-Type", "application/json")
                .body(Body::from(bytes))
                .ok()
        })
        .unwrap_or_else(|| {
            let mut resp = Response::new(Body::empty());
            *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            resp
        })
}
