//! Runtime settings loaded via OrthoConfig, plus the server configuration
//! object built from them.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::ports::{GeoLocator, VisitorStore};
use crate::inbound::http::cors::CorsPolicy;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://educational-verse.netlify.app";
pub const DEFAULT_GEO_LOOKUP_URL: &str = "http://ip-api.com/json/";
pub const DEFAULT_GEO_TIMEOUT_MS: u64 = 1500;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

const PRODUCTION: &str = "production";
const GEO_LOOKUP_OFF: &str = "off";

/// Settings rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid geolocation lookup URL {value:?}: {message}")]
    InvalidLookupUrl { value: String, message: String },
    #[error("invalid allowed origin {value:?}: {message}")]
    InvalidOrigin { value: String, message: String },
}

/// Where geolocation lookups go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoLookup {
    Disabled,
    Remote { endpoint: Url, timeout: Duration },
}

/// Process settings. Every field can come from `EDUVERSE_*` environment
/// variables, the matching `--flag`, or a config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EDUVERSE")]
pub struct ServerSettings {
    /// TCP port bound on all interfaces.
    #[ortho_config(default = 4000)]
    pub port: u16,
    /// Deployment mode; `production` enables the origin allow-list.
    pub environment: Option<String>,
    /// Front-end origin allowed in production.
    pub allowed_origin: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Base URL of the lookup service, or `off`.
    pub geo_lookup_url: Option<String>,
    /// Per-lookup timeout in milliseconds.
    pub geo_timeout_ms: Option<u64>,
}

impl ServerSettings {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port()))
    }

    /// Whether the deployment runs in production mode (case-insensitive).
    pub fn is_production(&self) -> bool {
        self.environment
            .as_deref()
            .is_some_and(|mode| mode.trim().eq_ignore_ascii_case(PRODUCTION))
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    /// Browser origin policy for the current mode.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidOrigin`] when production mode is configured
    /// with something that is not an `http(s)` origin.
    pub fn cors_policy(&self) -> Result<CorsPolicy, SettingsError> {
        if !self.is_production() {
            return Ok(CorsPolicy::AnyOrigin);
        }
        let raw = self
            .allowed_origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .unwrap_or(DEFAULT_ALLOWED_ORIGIN);
        let invalid = |message: &str| SettingsError::InvalidOrigin {
            value: raw.to_owned(),
            message: message.to_owned(),
        };
        let url = Url::parse(raw).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid("expected an http(s) origin"));
        }
        Ok(CorsPolicy::AllowOrigin(
            url.origin().ascii_serialization(),
        ))
    }

    /// Geolocation lookup target.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidLookupUrl`] for values that are neither `off`
    /// nor an absolute `http(s)` URL.
    pub fn geo_lookup(&self) -> Result<GeoLookup, SettingsError> {
        let raw = self
            .geo_lookup_url
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_GEO_LOOKUP_URL);
        if raw.eq_ignore_ascii_case(GEO_LOOKUP_OFF) {
            return Ok(GeoLookup::Disabled);
        }
        let invalid = |message: String| SettingsError::InvalidLookupUrl {
            value: raw.to_owned(),
            message,
        };
        let endpoint = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
            return Err(invalid("expected an absolute http(s) URL".to_owned()));
        }
        Ok(GeoLookup::Remote {
            endpoint,
            timeout: self.geo_timeout(),
        })
    }

    pub fn geo_timeout(&self) -> Duration {
        Duration::from_millis(self.geo_timeout_ms.unwrap_or(DEFAULT_GEO_TIMEOUT_MS))
    }
}

/// Everything [`super::create_server`] needs, already constructed.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors: CorsPolicy,
    pub(crate) store: Arc<dyn VisitorStore>,
    pub(crate) locator: Arc<dyn GeoLocator>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        cors: CorsPolicy,
        store: Arc<dyn VisitorStore>,
        locator: Arc<dyn GeoLocator>,
    ) -> Self {
        Self {
            bind_addr,
            cors,
            store,
            locator,
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
