//! Process-local `VisitorStore`.
//!
//! Used by tests and by deployments started without a database URL. State
//! lives for the lifetime of the process and is lost on restart.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{VisitorStore, VisitorStoreError};
use crate::domain::{LocationLabel, VisitorRecord};

/// In-memory visitor document guarded by an async mutex.
///
/// The lock is held across each whole read-modify-write, which is what makes
/// [`VisitorStore::increment`] atomic here.
#[derive(Debug, Default)]
pub struct InMemoryVisitorStore {
    record: Mutex<Option<VisitorRecord>>,
}

impl InMemoryVisitorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitorStore for InMemoryVisitorStore {
    async fn load(&self) -> Result<Option<VisitorRecord>, VisitorStoreError> {
        Ok(self.record.lock().await.clone())
    }

    async fn save(&self, record: &VisitorRecord) -> Result<(), VisitorStoreError> {
        if !record.is_consistent() {
            return Err(VisitorStoreError::corrupt(
                "refusing to save a record whose counts do not sum to its total",
            ));
        }
        *self.record.lock().await = Some(record.clone());
        Ok(())
    }

    async fn increment(&self, location: &LocationLabel) -> Result<u64, VisitorStoreError> {
        let mut guard = self.record.lock().await;
        let total = match guard.as_mut() {
            Some(record) => record.record(location.clone()),
            None => {
                let record = VisitorRecord::first_visit(location.clone());
                let total = record.total();
                *guard = Some(record);
                total
            }
        };
        Ok(total)
    }
}
