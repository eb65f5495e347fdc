//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL `VisitorStore` using Diesel
//! - **memory**: process-local `VisitorStore`
//! - **geo**: `GeoLocator` implementations
//!
//! Adapters only translate between domain types and infrastructure
//! representations; resolution policy and counting rules stay in the domain.

pub mod geo;
pub mod memory;
pub mod persistence;
