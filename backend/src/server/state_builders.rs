//! Builds the HTTP state from the selected driven adapters.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{GeoLocator, VisitorStore};
use crate::domain::{StatsReporter, VisitRecorder};
use crate::inbound::http::state::HttpState;

/// Wire the visit and stats services over one shared store.
pub fn build_http_state(
    store: Arc<dyn VisitorStore>,
    locator: Arc<dyn GeoLocator>,
) -> web::Data<HttpState> {
    let visits = VisitRecorder::new(Arc::clone(&store), locator);
    let stats = StatsReporter::new(store);
    web::Data::new(HttpState::new(Arc::new(visits), Arc::new(stats)))
}
