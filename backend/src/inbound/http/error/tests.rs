//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("record visit failed: password authentication failed").with_trace_id(TRACE_ID)
}

async fn body_of(response: HttpResponse) -> ErrorBody {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error envelope decodes")
}

#[rstest]
#[case::not_found(Error::not_found("Not Found"), StatusCode::NOT_FOUND)]
#[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error: Error) {
    let response = ResponseError::error_response(&internal_error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_of(response).await,
        ErrorBody {
            error: INTERNAL_ERROR_MESSAGE.to_owned()
        }
    );
}

#[rstest]
#[actix_web::test]
async fn trace_id_is_exposed_as_header(internal_error: Error) {
    let response = ResponseError::error_response(&internal_error);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header is set")
        .to_str()
        .expect("trace-id header is ASCII");

    assert_eq!(header, TRACE_ID);
}

#[actix_web::test]
async fn not_found_keeps_its_message_and_omits_missing_trace_id() {
    let error = Error::not_found("Not Found");
    let response = ResponseError::error_response(&error);

    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    assert_eq!(body_of(response).await.error, "Not Found");
}
