//! Visit Recorder: the driving side of `POST /api/visitor/visit`.
//!
//! Resolves the visit's location and hands the whole mutation to
//! [`VisitorStore::increment`]. Never load the record and save it back from
//! here: concurrent visits would overwrite each other's counts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{GeoLocator, VisitCommand, VisitorStore, VisitorStoreError};
use crate::domain::{Error, VisitReceipt, resolve_location};

/// Service implementing [`VisitCommand`].
pub struct VisitRecorder<S: ?Sized, G: ?Sized> {
    store: Arc<S>,
    locator: Arc<G>,
}

impl<S: ?Sized, G: ?Sized> Clone for VisitRecorder<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locator: Arc::clone(&self.locator),
        }
    }
}

impl<S: ?Sized, G: ?Sized> VisitRecorder<S, G> {
    /// Create a recorder over the given store and geolocation capability.
    pub fn new(store: Arc<S>, locator: Arc<G>) -> Self {
        Self { store, locator }
    }
}

pub(crate) fn map_store_error(operation: &'static str, err: VisitorStoreError) -> Error {
    error!(operation, error = %err, "visitor store failure");
    Error::internal(format!("{operation} failed: {err}"))
}

#[async_trait]
impl<S, G> VisitCommand for VisitRecorder<S, G>
where
    S: VisitorStore + ?Sized,
    G: GeoLocator + ?Sized,
{
    async fn record_visit(&self, client_address: Option<String>) -> Result<VisitReceipt, Error> {
        let location = resolve_location(self.locator.as_ref(), client_address.as_deref()).await;
        let total = self
            .store
            .increment(&location)
            .await
            .map_err(|err| map_store_error("record visit", err))?;

        debug!(%location, total, "visit recorded");
        Ok(VisitReceipt { total, location })
    }
}
