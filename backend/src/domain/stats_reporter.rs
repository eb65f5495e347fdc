//! Stats Reporter: read-only projection behind `GET /api/visitor/count`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{VisitorStatsQuery, VisitorStore};
use crate::domain::visit_recorder::map_store_error;
use crate::domain::{Error, VisitorRecord};

/// Service implementing [`VisitorStatsQuery`].
pub struct StatsReporter<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for StatsReporter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ?Sized> StatsReporter<S> {
    /// Create a reporter reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> VisitorStatsQuery for StatsReporter<S>
where
    S: VisitorStore + ?Sized,
{
    async fn fetch_stats(&self) -> Result<VisitorRecord, Error> {
        let record = self
            .store
            .load()
            .await
            .map_err(|err| map_store_error("load visitor stats", err))?;
        Ok(record.unwrap_or_else(VisitorRecord::empty))
    }
}
