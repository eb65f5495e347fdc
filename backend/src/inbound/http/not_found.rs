//! Fallback for requests no route matched.

use crate::domain::Error;

/// Message sent with every 404.
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Default service: answers `404 {"error": "Not Found"}` through the shared
/// error mapping.
pub async fn not_found() -> Result<actix_web::HttpResponse, Error> {
    Err(Error::not_found(NOT_FOUND_MESSAGE))
}
