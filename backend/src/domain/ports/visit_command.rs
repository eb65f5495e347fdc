//! Driving port for recording visits.
//!
//! HTTP handlers call this port with whatever client address the transport
//! exposed; resolution and persistence stay behind it.

use async_trait::async_trait;

use crate::domain::{Error, VisitReceipt};

/// Use-case port recording one visit event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitCommand: Send + Sync {
    /// Record a visit from `client_address` (forwarding header value or peer
    /// address, possibly absent or malformed).
    async fn record_visit(&self, client_address: Option<String>) -> Result<VisitReceipt, Error>;
}

