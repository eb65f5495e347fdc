//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`VisitorStore`, `GeoLocator`) are implemented by outbound
//! adapters; driving ports (`VisitCommand`, `VisitorStatsQuery`) are what the
//! inbound HTTP adapter depends on.

mod macros;
pub(crate) use macros::define_port_error;

mod geo_locator;
mod visit_command;
mod visitor_stats_query;
mod visitor_store;

#[cfg(test)]
pub use geo_locator::MockGeoLocator;
pub use geo_locator::{GeoLocation, GeoLocator, GeoLocatorError};
#[cfg(test)]
pub use visit_command::MockVisitCommand;
pub use visit_command::VisitCommand;
#[cfg(test)]
pub use visitor_stats_query::MockVisitorStatsQuery;
pub use visitor_stats_query::VisitorStatsQuery;
#[cfg(test)]
pub use visitor_store::MockVisitorStore;
pub use visitor_store::{VisitorStore, VisitorStoreError};
