//! Displayed list state
//!
//! The collection a view currently renders. The mutation controller edits it
//! in lockstep with the cache entry of the same list.

use crate::SharedItem;
use shelf_core::{CacheKey, MembershipId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Load status of a displayed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing opened yet
    Idle,
    /// A load is in flight
    Loading,
    /// Items are published
    Ready,
    /// The last load failed
    Failed(String),
}

#[derive(Debug)]
struct DisplayState {
    key: Option<CacheKey>,
    items: Vec<SharedItem>,
    status: LoadStatus,
    generation: u64,
    /// Bumped on every write to `items`
    revision: u64,
}

/// Shared handle to the displayed collection of one view
#[derive(Debug, Clone)]
pub struct DisplayedList {
    state: Arc<RwLock<DisplayState>>,
}

impl Default for DisplayedList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayedList {
    /// Create an empty, idle display
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(DisplayState {
                key: None,
                items: Vec::new(),
                status: LoadStatus::Idle,
                generation: 0,
                revision: 0,
            })),
        }
    }

    /// Items currently displayed
    pub async fn items(&self) -> Vec<SharedItem> {
        self.state.read().await.items.clone()
    }

    /// List currently displayed
    pub async fn key(&self) -> Option<CacheKey> {
        self.state.read().await.key.clone()
    }

    /// Current load status
    pub async fn status(&self) -> LoadStatus {
        self.state.read().await.status.clone()
    }

    /// Number of writes to the item collection so far
    pub async fn revision(&self) -> u64 {
        self.state.read().await.revision
    }

    /// Find a displayed item by membership id
    pub async fn find(&self, membership_id: MembershipId) -> Option<SharedItem> {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|i| i.internal_id == membership_id)
            .cloned()
    }

    /// Check if a membership is displayed
    pub async fn contains(&self, membership_id: MembershipId) -> bool {
        self.find(membership_id).await.is_some()
    }

    /// Generation of the most recent `begin`
    pub(crate) async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Start displaying `key`: clears items and returns the new generation.
    pub(crate) async fn begin(&self, key: CacheKey) -> u64 {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.key = Some(key);
        state.items.clear();
        state.revision += 1;
        state.status = LoadStatus::Loading;
        state.generation
    }

    /// Publish loaded items if the load is still current.
    ///
    /// Returns `false` (and writes nothing) when a newer `begin` happened or
    /// `cancel` fired.
    pub(crate) async fn publish(
        &self,
        generation: u64,
        items: Vec<SharedItem>,
        cancel: &CancellationToken,
    ) -> bool {
        let mut state = self.state.write().await;
        if state.generation != generation || cancel.is_cancelled() {
            debug!(generation, current = state.generation, "Dropping stale list load");
            return false;
        }
        state.items = items;
        state.revision += 1;
        state.status = LoadStatus::Ready;
        true
    }

    /// Record a failed load if it is still current
    pub(crate) async fn fail(&self, generation: u64, message: String, cancel: &CancellationToken) {
        let mut state = self.state.write().await;
        if state.generation == generation && !cancel.is_cancelled() {
            state.status = LoadStatus::Failed(message);
        }
    }

    /// Remove an item of list `key`, returning its index and the item
    pub(crate) async fn remove_item(
        &self,
        key: &CacheKey,
        membership_id: MembershipId,
    ) -> Option<(usize, SharedItem)> {
        let mut state = self.state.write().await;
        if state.key.as_ref() != Some(key) {
            return None;
        }
        let index = state
            .items
            .iter()
            .position(|i| i.internal_id == membership_id)?;
        let item = state.items.remove(index);
        state.revision += 1;
        Some((index, item))
    }

    /// Reinsert an item of list `key` at `index` (clamped).
    ///
    /// No-op if the view has moved to another list or the item is back already.
    pub(crate) async fn restore_item(&self, key: &CacheKey, index: usize, item: SharedItem) {
        let mut state = self.state.write().await;
        if state.key.as_ref() != Some(key)
            || state.items.iter().any(|i| i.internal_id == item.internal_id)
        {
            return;
        }
        let index = index.min(state.items.len());
        state.items.insert(index, item);
        state.revision += 1;
    }
}
