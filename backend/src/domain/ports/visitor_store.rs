//! Driven port for the visitor document.
//!
//! Adapters own the single [`VisitorRecord`] of the deployment. The Visit
//! Recorder only ever calls [`VisitorStore::increment`], which must apply the
//! whole visit atomically; `load` and `save` serve the Stats Reporter and
//! administrative writes.

use async_trait::async_trait;

use crate::domain::{LocationLabel, VisitorRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by visitor store adapters.
    pub enum VisitorStoreError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "visitor store connection failed: {message}",
        /// A read or write was rejected while executing.
        Query { message: String } =>
            "visitor store query failed: {message}",
        /// Stored data violates the visitor record invariants.
        Corrupt { message: String } =>
            "visitor store holds an inconsistent record: {message}",
    }
}

/// Persistence contract for the singleton [`VisitorRecord`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitorStore: Send + Sync {
    /// Fetch the current record.
    ///
    /// Returns `None` before the first visit has been stored. Total and
    /// locations must come from one consistent snapshot.
    async fn load(&self) -> Result<Option<VisitorRecord>, VisitorStoreError>;

    /// Persist `record` in full, creating or replacing the stored document.
    ///
    /// Concurrent readers observe either the previous document or the new
    /// one, never a mix.
    async fn save(&self, record: &VisitorRecord) -> Result<(), VisitorStoreError>;

    /// Count one visit from `location` and return the new total.
    ///
    /// Creates the record when absent, inserts the location with a count of
    /// one when unseen, and increments both counters otherwise. The whole
    /// update is atomic with respect to other calls, so concurrent visits are
    /// never lost.
    async fn increment(&self, location: &LocationLabel) -> Result<u64, VisitorStoreError>;
}
