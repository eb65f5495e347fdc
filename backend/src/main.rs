//! Backend entry-point: loads settings, selects adapters and serves HTTP.

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use eduverse_backend::domain::ports::{GeoLocator, VisitorStore};
use eduverse_backend::inbound::http::health::HealthState;
use eduverse_backend::outbound::geo::{DisabledGeoLocator, HttpGeoLocator};
use eduverse_backend::outbound::memory::InMemoryVisitorStore;
use eduverse_backend::outbound::persistence::{
    DbPool, DieselVisitorStore, PoolConfig, run_migrations,
};
use eduverse_backend::server::{GeoLookup, ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let cors = settings.cors_policy().map_err(std::io::Error::other)?;
    let geo_lookup = settings.geo_lookup().map_err(std::io::Error::other)?;
    info!(
        production = settings.is_production(),
        port = settings.port(),
        "starting visitor backend"
    );

    let store = build_store(&settings).await?;
    let locator = build_locator(geo_lookup)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(settings.bind_addr(), cors, store, locator);
    let server = create_server(health_state, config)?;
    server.await
}

async fn build_store(settings: &ServerSettings) -> std::io::Result<Arc<dyn VisitorStore>> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; visitor counts will not survive a restart");
        return Ok(Arc::new(InMemoryVisitorStore::new()));
    };

    run_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    info!(
        max_connections = settings.db_max_connections(),
        "using PostgreSQL visitor store"
    );
    Ok(Arc::new(DieselVisitorStore::new(pool)))
}

fn build_locator(lookup: GeoLookup) -> std::io::Result<Arc<dyn GeoLocator>> {
    match lookup {
        GeoLookup::Disabled => {
            info!("geolocation lookups disabled; visits are counted as Unknown");
            Ok(Arc::new(DisabledGeoLocator))
        }
        GeoLookup::Remote { endpoint, timeout } => {
            info!(%endpoint, ?timeout, "using HTTP geolocation");
            let locator = HttpGeoLocator::new(endpoint, timeout).map_err(std::io::Error::other)?;
            Ok(Arc::new(locator))
        }
    }
}
