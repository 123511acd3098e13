use crate::demographics::{is_valid_zip, DemographicRecord};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{json_response, ErrorBody};
use crate::state::AppState;
use serde::Serialize;

/// 404 body of the demographics endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MissingDemographics {
    pub error: String,
    pub zip: String,
}

/// `GET /demographics/:zip`
///
/// A record without a median income is reported as not found, even when
/// other fields were parsed.
#[utoipa::path(
    get,
    path = "/demographics/{zip}",
    tag = "demographics",
    params(("zip" = String, Path, description = "Five digit ZIP code")),
    responses(
        (status = 200, description = "Cached or freshly scraped demographics", body = DemographicRecord),
        (status = 400, description = "ZIP is not five digits", body = ErrorBody),
        (status = 404, description = "No data, or no median income", body = MissingDemographics),
    )
)]
pub fn zip_demographics(zip: &str, state: &AppState) -> ResultResp {
    if !is_valid_zip(zip) {
        return Err(ServerError::BadRequest(format!(
            "zip must be 5 digits, got {zip:?}"
        )));
    }

    match state.demographics.get_demographics(zip)? {
        Some(record) if record.has_income() => json_response(200, &record),
        _ => json_response(
            404,
            &MissingDemographics {
                error: "No demographic data found for this ZIP code".into(),
                zip: zip.to_string(),
            },
        ),
    }
}
