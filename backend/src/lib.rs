//! Visitor-tracking backend for the Educational Verse front-end.
//!
//! Counts anonymous visits, attributes each to the visitor's city via an IP
//! geolocation lookup, and reports the running totals over HTTP.
//!
//! Layout follows a ports-and-adapters split:
//! - [`domain`]: counter model, services and ports
//! - [`inbound`]: actix-web handlers
//! - [`outbound`]: PostgreSQL, in-memory and geolocation adapters
//! - [`server`]: settings and application wiring

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware.
pub use middleware::Trace;
