//! OpenAPI documentation for the visitor API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for client generation.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::visitor::{CityCount, VisitResponse, VisitorCountResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Educational Verse visitor API",
        description = "Anonymous visit counting with per-city breakdown, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::visitor::record_visit,
        crate::inbound::http::visitor::visitor_count,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(VisitResponse, VisitorCountResponse, CityCount, ErrorBody)),
    tags(
        (name = "visitor", description = "Visit recording and statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case::visit("/api/visitor/visit")]
    #[case::count("/api/visitor/count")]
    #[case::ready("/health/ready")]
    #[case::live("/health/live")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} should be documented");
    }

    #[rstest]
    #[case::visit("VisitResponse", &["total", "city"])]
    #[case::count("VisitorCountResponse", &["total", "cities"])]
    #[case::city("CityCount", &["city", "count"])]
    #[case::error("ErrorBody", &["error"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }
}
