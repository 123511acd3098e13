use crate::domain::property::PropertyDetail;
use crate::domain::search::{execute_search, PropertySearch, SearchPage};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{json_response, ErrorBody};
use crate::state::AppState;
use std::collections::HashMap;

/// `GET /properties`
#[utoipa::path(
    get,
    path = "/properties",
    tag = "properties",
    params(
        ("status" = String, Query, description = "Listing status, e.g. for_sale"),
        ("state_code" = Option<String>, Query, description = "Two-letter state; scopes the demographic filters"),
        ("page" = Option<i64>, Query, description = "1-based page, default 1"),
        ("limit" = Option<i64>, Query, description = "Page size, clamped to 1..=100, default 20"),
        ("min_price" = Option<f64>, Query),
        ("max_price" = Option<f64>, Query),
        ("min_bed" = Option<f64>, Query),
        ("max_bed" = Option<f64>, Query),
        ("min_bath" = Option<f64>, Query),
        ("max_bath" = Option<f64>, Query),
        ("min_acre_lot" = Option<f64>, Query),
        ("max_acre_lot" = Option<f64>, Query),
        ("min_house_size" = Option<f64>, Query),
        ("max_house_size" = Option<f64>, Query),
        ("min_population" = Option<f64>, Query),
        ("max_population" = Option<f64>, Query),
        ("min_median_income" = Option<f64>, Query),
        ("max_median_income" = Option<f64>, Query),
        ("min_median_age" = Option<f64>, Query),
        ("max_median_age" = Option<f64>, Query),
    ),
    responses(
        (status = 200, description = "One page of matching listings", body = SearchPage),
        (status = 400, description = "Missing status or a malformed numeric filter", body = ErrorBody),
    )
)]
pub fn list_properties(params: &HashMap<String, String>, state: &AppState) -> ResultResp {
    let search = PropertySearch::from_query(params)?;
    let page = execute_search(&search, &state.demographics, state.properties.as_ref())?;
    json_response(200, &page)
}

/// `GET /property/:id`
#[utoipa::path(
    get,
    path = "/property/{id}",
    tag = "properties",
    params(
        ("id" = i64, Path, description = "Property id"),
        ("include_zip_info" = Option<bool>, Query, description = "Attach demographics for the listing's zip"),
    ),
    responses(
        (status = 200, description = "The listing", body = PropertyDetail),
        (status = 404, description = "No listing with this id", body = ErrorBody),
    )
)]
pub fn property_detail(
    raw_id: &str,
    params: &HashMap<String, String>,
    state: &AppState,
) -> ResultResp {
    let id: i64 = raw_id.parse().map_err(|_| ServerError::not_found())?;
    let property = state
        .properties
        .find_by_id(id)?
        .ok_or_else(ServerError::not_found)?;

    let zip_info = if params.get("include_zip_info").map(String::as_str) == Some("true") {
        let info = match property.zip_code.as_deref() {
            Some(zip) => state.demographics.get_demographics(zip)?,
            None => None,
        };
        Some(info)
    } else {
        None
    };

    json_response(200, &PropertyDetail { property, zip_info })
}
