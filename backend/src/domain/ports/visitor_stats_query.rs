//! Driving port for reading visitor statistics.

use async_trait::async_trait;

use crate::domain::{Error, VisitorRecord};

/// Use-case port projecting the current visitor record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitorStatsQuery: Send + Sync {
    /// Current record, or [`VisitorRecord::empty`] before the first visit.
    async fn fetch_stats(&self) -> Result<VisitorRecord, Error>;
}

