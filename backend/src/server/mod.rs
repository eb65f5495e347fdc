//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{
    DEFAULT_ALLOWED_ORIGIN, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_GEO_LOOKUP_URL,
    DEFAULT_GEO_TIMEOUT_MS, DEFAULT_PORT, GeoLookup, ServerConfig, ServerSettings, SettingsError,
};
pub use state_builders::build_http_state;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::cors::CorsPolicy;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::not_found::not_found;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::visitor::{record_visit, visitor_count};

/// Shared pieces cloned into every worker's `App`.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub cors: CorsPolicy,
}

/// Assemble the application: visitor API under `/api`, probes, CORS, request
/// tracing and the JSON 404 fallback.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        cors,
    } = deps;

    let api = web::scope("/api")
        .service(record_visit)
        .service(visitor_count);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(cors.middleware())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.default_service(web::to(not_found))
}

/// Bind the listener and start serving.
///
/// The returned [`Server`] must be awaited to drive it. `health_state` is
/// marked ready once the socket is bound.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        cors,
        store,
        locator,
    } = config;
    let http_state = build_http_state(store, locator);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        cors,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
