//! Geolocation adapters that never leave the process.

use std::collections::HashMap;
use std::net::IpAddr;

use async_trait::async_trait;

use crate::domain::ports::{GeoLocation, GeoLocator, GeoLocatorError};

/// Fixed table of known addresses. Unlisted addresses resolve to `None`.
///
/// # Examples
/// ```
/// use std::net::IpAddr;
///
/// use eduverse_backend::outbound::geo::StaticGeoLocator;
///
/// let paris: IpAddr = "81.2.69.142".parse().expect("valid address");
/// let locator = StaticGeoLocator::default().with_city(paris, "Paris");
/// assert_eq!(locator.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticGeoLocator {
    entries: HashMap<IpAddr, GeoLocation>,
}

impl StaticGeoLocator {
    pub fn new(entries: impl IntoIterator<Item = (IpAddr, GeoLocation)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Map `address` to `city`, replacing any earlier entry.
    #[must_use]
    pub fn with_city(mut self, address: IpAddr, city: impl Into<String>) -> Self {
        self.entries.insert(address, GeoLocation::with_city(city));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl GeoLocator for StaticGeoLocator {
    async fn locate(&self, address: IpAddr) -> Result<Option<GeoLocation>, GeoLocatorError> {
        Ok(self.entries.get(&address).cloned())
    }
}

/// Locator used when lookups are switched off; every address is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeoLocator;

#[async_trait]
impl GeoLocator for DisabledGeoLocator {
    async fn locate(&self, _address: IpAddr) -> Result<Option<GeoLocation>, GeoLocatorError> {
        Ok(None)
    }
}
