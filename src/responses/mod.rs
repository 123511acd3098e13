pub mod cors;
pub mod errors;
pub mod html;
pub mod json;

pub use crate::errors::ResultResp;
pub use cors::preflight_response;
pub use errors::{error_to_response, ErrorBody};
pub use html::html_response;
pub use json::json_response;
