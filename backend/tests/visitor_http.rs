//! End-to-end HTTP behaviour of the visitor API.
//!
//! Runs the full application (CORS, tracing, 404 fallback) against the
//! in-memory store and a static geolocation table, so no network or database
//! is needed.

use std::net::IpAddr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN};
use actix_web::{test, web};
use futures::future::join_all;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use eduverse_backend::domain::TRACE_ID_HEADER;
use eduverse_backend::inbound::http::cors::CorsPolicy;
use eduverse_backend::inbound::http::health::HealthState;
use eduverse_backend::outbound::geo::StaticGeoLocator;
use eduverse_backend::outbound::memory::InMemoryVisitorStore;
use eduverse_backend::server::{AppDependencies, build_app, build_http_state};

const PARIS_CLIENT: &str = "81.2.69.142";
const LONDON_CLIENT: &str = "81.2.69.160";

#[fixture]
fn deps() -> AppDependencies {
    let locator = StaticGeoLocator::default()
        .with_city(ip(PARIS_CLIENT), "Paris")
        .with_city(ip(LONDON_CLIENT), "London");
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: build_http_state(Arc::new(InMemoryVisitorStore::new()), Arc::new(locator)),
        cors: CorsPolicy::AnyOrigin,
    }
}

fn ip(raw: &str) -> IpAddr {
    raw.parse().expect("valid address")
}

fn visit_from(forwarded_for: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/visitor/visit")
        .insert_header(("X-Forwarded-For", forwarded_for))
}

fn count_request() -> test::TestRequest {
    test::TestRequest::get().uri("/api/visitor/count")
}

#[rstest]
#[actix_web::test]
async fn reports_empty_counters_before_any_visit(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;

    let body: Value = test::call_and_read_body_json(&app, count_request().to_request()).await;

    assert_eq!(body, json!({"total": 0, "cities": []}));
}

#[rstest]
#[actix_web::test]
async fn counts_visits_per_city_with_unknown_bucket(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;

    let first: Value =
        test::call_and_read_body_json(&app, visit_from(PARIS_CLIENT).to_request()).await;
    assert_eq!(first, json!({"total": 1, "city": "Paris"}));

    let chain = format!("{PARIS_CLIENT}, 10.0.0.4");
    let second: Value =
        test::call_and_read_body_json(&app, visit_from(&chain).to_request()).await;
    assert_eq!(second, json!({"total": 2, "city": "Paris"}));

    let third: Value =
        test::call_and_read_body_json(&app, visit_from("not-an-address").to_request()).await;
    assert_eq!(third, json!({"total": 3, "city": "Unknown"}));

    let stats: Value = test::call_and_read_body_json(&app, count_request().to_request()).await;
    assert_eq!(
        stats,
        json!({
            "total": 3,
            "cities": [
                {"city": "Paris", "count": 2},
                {"city": "Unknown", "count": 1}
            ]
        })
    );
}

#[rstest]
#[actix_web::test]
async fn stats_reads_are_idempotent(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    test::call_service(&app, visit_from(LONDON_CLIENT).to_request()).await;

    let first: Value = test::call_and_read_body_json(&app, count_request().to_request()).await;
    let second: Value = test::call_and_read_body_json(&app, count_request().to_request()).await;

    assert_eq!(first, second);
    assert_eq!(first["total"], json!(1));
}

#[rstest]
#[actix_web::test]
async fn concurrent_visits_are_all_counted(deps: AppDependencies) {
    const VISITS: usize = 40;
    let app = test::init_service(build_app(deps)).await;

    let responses = join_all((0..VISITS).map(|n| {
        let client = if n % 2 == 0 { PARIS_CLIENT } else { LONDON_CLIENT };
        test::call_service(&app, visit_from(client).to_request())
    }))
    .await;
    assert!(responses.iter().all(|res| res.status() == StatusCode::OK));

    let stats: Value = test::call_and_read_body_json(&app, count_request().to_request()).await;
    assert_eq!(
        stats,
        json!({
            "total": VISITS,
            "cities": [
                {"city": "London", "count": VISITS / 2},
                {"city": "Paris", "count": VISITS / 2}
            ]
        })
    );
}

#[rstest]
#[case::unknown_path("/nope")]
#[case::unknown_api_path("/api/visitor")]
#[actix_web::test]
async fn unmatched_routes_return_json_404(deps: AppDependencies, #[case] uri: &str) {
    let app = test::init_service(build_app(deps)).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"error": "Not Found"}));
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;

    let res = test::call_service(&app, count_request().to_request()).await;

    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn development_preflight_echoes_origin(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/visitor/visit")
        .insert_header((ORIGIN, "http://localhost:5173"))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("http://localhost:5173")
    );
}
