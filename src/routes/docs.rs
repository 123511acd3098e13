//! OpenAPI document and a Swagger UI page over it.

use crate::demographics::DemographicRecord;
use crate::domain::property::{PropertyDetail, PropertyRecord};
use crate::domain::search::{PageInfo, SearchPage};
use crate::errors::ResultResp;
use crate::responses::{html_response, json_response, ErrorBody};
use crate::routes::demographics::{self, MissingDemographics};
use crate::routes::properties;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use utoipa::OpenApi;

pub const DOCUMENT_PATH: &str = "/docs/json";
const SWAGGER_UI_DIST: &str = "https://unpkg.com/swagger-ui-dist@5";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Listings API",
        description = "Property search with integrated ZipWho demographics",
        version = "1.0.0"
    ),
    paths(
        properties::list_properties,
        properties::property_detail,
        demographics::zip_demographics,
    ),
    components(schemas(
        PropertyRecord,
        PropertyDetail,
        SearchPage,
        PageInfo,
        DemographicRecord,
        ErrorBody,
        MissingDemographics,
    )),
    tags(
        (name = "properties", description = "Listing search and detail"),
        (name = "demographics", description = "Cached ZIP demographics"),
    )
)]
pub struct ApiDoc;

/// `GET /docs/json`
pub fn openapi_document() -> ResultResp {
    json_response(200, &ApiDoc::openapi())
}

/// `GET /docs`
pub fn swagger_ui() -> ResultResp {
    html_response(swagger_page(DOCUMENT_PATH))
}

fn swagger_page(document_url: &str) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Listings API docs" }
                link rel="stylesheet" href=(format!("{SWAGGER_UI_DIST}/swagger-ui.css"));
            }
            body {
                div id="swagger-ui" {}
                script src=(format!("{SWAGGER_UI_DIST}/swagger-ui-bundle.js")) {}
                script {
                    (PreEscaped(format!(
                        "SwaggerUIBundle({{ url: '{document_url}', dom_id: '#swagger-ui', docExpansion: 'list', deepLinking: false }});"
                    )))
                }
            }
        }
    }
}
