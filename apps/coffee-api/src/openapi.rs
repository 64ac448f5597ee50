//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Coffee API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coffee API",
        version = "0.1.0",
        description = "Coffee catalog with shared flavor tags"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/coffees", api = domain_coffees::ApiDoc)
    ),
    tags(
        (name = "coffees", description = "Coffee catalog endpoints")
    )
)]
pub struct ApiDoc;
