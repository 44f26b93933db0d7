//! Per-source sync bookkeeping.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::Result;

/// Records when each import list source last synced successfully.
#[async_trait]
pub trait ListStatusStore: Send + Sync {
    /// When the source last completed a fetch, if ever.
    async fn last_sync(&self, source_id: i64) -> Result<Option<DateTime<Utc>>>;

    /// Record a successful fetch.
    async fn record_sync(&self, source_id: i64, at: DateTime<Utc>) -> Result<()>;
}

/// In-memory [`ListStatusStore`] for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryListStatusStore {
    syncs: RwLock<HashMap<i64, DateTime<Utc>>>,
}

impl MemoryListStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStatusStore for MemoryListStatusStore {
    async fn last_sync(&self, source_id: i64) -> Result<Option<DateTime<Utc>>> {
        Ok(self.syncs.read().await.get(&source_id).copied())
    }

    async fn record_sync(&self, source_id: i64, at: DateTime<Utc>) -> Result<()> {
        self.syncs.write().await.insert(source_id, at);
        Ok(())
    }
}
