//! Cross-origin policy for browser clients.

use actix_cors::Cors;
use actix_web::http::Method;

/// Preflight responses may be cached for an hour.
pub const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Production: only the deployed front-end.
    AllowOrigin(String),
    /// Development: echo whatever origin asks.
    AnyOrigin,
}

impl CorsPolicy {
    /// Build the actix-cors middleware for this policy.
    ///
    /// Credentials are allowed, so the origin is always echoed back instead
    /// of answering with `*`.
    pub fn middleware(&self) -> Cors {
        let cors = Cors::default()
            .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_any_header()
            .supports_credentials()
            .max_age(PREFLIGHT_MAX_AGE_SECS);

        match self {
            Self::AllowOrigin(origin) => cors.allowed_origin(origin),
            Self::AnyOrigin => cors.allow_any_origin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::HeaderMap;
    use actix_web::http::header::{
        ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
    };
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    const FRONTEND: &str = "https://educational-verse.netlify.app";

    async fn preflight(policy: CorsPolicy, origin: &str) -> (StatusCode, HeaderMap) {
        let app = test::init_service(
            App::new()
                .wrap(policy.middleware())
                .route("/probe", web::post().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/probe")
            .insert_header((ORIGIN, origin))
            .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let res = test::call_service(&app, req).await;
        (res.status(), res.headers().clone())
    }

    fn allow_origin(headers: &HeaderMap) -> Option<&str> {
        headers
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
    }

    #[rstest]
    #[case::production(CorsPolicy::AllowOrigin(FRONTEND.to_owned()), FRONTEND)]
    #[case::development(CorsPolicy::AnyOrigin, "http://localhost:5173")]
    #[actix_web::test]
    async fn permitted_origins_are_echoed(#[case] policy: CorsPolicy, #[case] origin: &str) {
        let (status, headers) = preflight(policy, origin).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(allow_origin(&headers), Some(origin));
        assert_eq!(
            headers
                .get(ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|value| value.to_str().ok()),
            Some("true")
        );
    }

    #[actix_web::test]
    async fn production_rejects_foreign_origins() {
        let (_, headers) = preflight(
            CorsPolicy::AllowOrigin(FRONTEND.to_owned()),
            "https://evil.example",
        )
        .await;

        assert_eq!(allow_origin(&headers), None);
    }
}
