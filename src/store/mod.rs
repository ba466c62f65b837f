//! Gateway traits over the persisted collections.
//!
//! The core depends on these interfaces, not on a storage engine. The
//! SQLite implementation lives in [`crate::db`]; tests inject in-memory
//! fakes.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::models::{Tracker, TrackerCategory, TrackerRecord};

/// Which persisted collection changed. Subscribers re-fetch and rebuild
/// derived state from scratch; no diff is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Categories,
    Trackers,
    Records,
}

/// Receiving end of a store's change feed. Dropping the subscription
/// cancels it.
pub struct ChangeSubscription {
    receiver: broadcast::Receiver<StoreChange>,
}

impl ChangeSubscription {
    pub fn new(receiver: broadcast::Receiver<StoreChange>) -> Self {
        Self { receiver }
    }

    /// Waits for the next change. Returns `None` once the publishing store
    /// has been dropped. A lagged receiver skips ahead rather than
    /// erroring; subscribers rebuild wholesale anyway.
    pub async fn changed(&mut self) -> Option<StoreChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`changed`](Self::changed): returns a change
    /// if one is already queued.
    pub fn try_changed(&mut self) -> Option<StoreChange> {
        loop {
            match self.receiver.try_recv() {
                Ok(change) => return Some(change),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

/// Category collection, keyed by title.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories with their trackers, in stable (title) order.
    async fn fetch_all(&self) -> Result<Vec<TrackerCategory>>;

    async fn create(&self, title: &str) -> Result<()>;

    async fn rename(&self, old_title: &str, new_title: &str) -> Result<()>;

    async fn delete(&self, title: &str) -> Result<()>;

    fn subscribe(&self) -> ChangeSubscription;
}

/// Tracker collection, keyed by id.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Tracker>>;

    /// Persists a tracker under the named category, creating the category
    /// on first use.
    async fn create(&self, tracker: &Tracker, category_title: &str) -> Result<()>;

    fn subscribe(&self) -> ChangeSubscription;
}

/// Completion record collection, keyed by (tracker id, day).
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<TrackerRecord>>;

    async fn create(&self, record: TrackerRecord) -> Result<()>;

    async fn delete(&self, record: TrackerRecord) -> Result<()>;

    fn subscribe(&self) -> ChangeSubscription;
}
