//! Geolocation adapters implementing the `GeoLocator` port.
//!
//! - `HttpGeoLocator`: remote JSON lookup service (ip-api.com contract).
//! - `StaticGeoLocator`: fixed in-process table.
//! - `DisabledGeoLocator`: lookups switched off.

mod dto;
mod http_locator;
mod static_locator;

pub use http_locator::HttpGeoLocator;
pub use static_locator::{DisabledGeoLocator, StaticGeoLocator};
