//! HTTP inbound adapter exposing the visitor endpoints and probes.

pub mod client_address;
pub mod cors;
pub mod error;
pub mod health;
pub mod not_found;
pub mod state;
pub mod visitor;

pub use error::ApiResult;
