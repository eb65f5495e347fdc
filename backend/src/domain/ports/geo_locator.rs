//! Driven port for IP geolocation lookups.
//!
//! The lookup is a capability returning an optional structured result; the
//! domain decides which field becomes the location label and what happens
//! when the lookup fails.

use std::net::IpAddr;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by geolocation adapters.
    pub enum GeoLocatorError {
        /// The lookup service could not be reached or answered with an error status.
        Transport { message: String } =>
            "geolocation transport failed: {message}",
        /// The lookup did not complete within the configured timeout.
        Timeout { message: String } =>
            "geolocation lookup timed out: {message}",
        /// The lookup answer could not be decoded.
        Decode { message: String } =>
            "geolocation response could not be decoded: {message}",
    }
}

/// Structured lookup result. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoLocation {
    /// City name, when the lookup database knows it.
    pub city: Option<String>,
    /// Region or state name, when known.
    pub region: Option<String>,
}

impl GeoLocation {
    /// Location with a known city.
    pub fn with_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            region: None,
        }
    }
}

/// Capability resolving an IP address to a coarse location.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Look up `address`.
    ///
    /// Returns `Ok(None)` when the address is not in the lookup database.
    async fn locate(&self, address: IpAddr) -> Result<Option<GeoLocation>, GeoLocatorError>;
}
