//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving ports, so they stay testable without a database or network.

use std::sync::Arc;

use crate::domain::ports::{VisitCommand, VisitorStatsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub visits: Arc<dyn VisitCommand>,
    pub stats: Arc<dyn VisitorStatsQuery>,
}

impl HttpState {
    pub fn new(visits: Arc<dyn VisitCommand>, stats: Arc<dyn VisitorStatsQuery>) -> Self {
        Self { visits, stats }
    }
}
