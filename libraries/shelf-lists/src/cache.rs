//! Session cache of resolved list content
//!
//! One entry per (owner, list name). Unbounded and without TTL: a user has
//! few lists, and entries are dropped explicitly on delete or rename.

use crate::SharedItem;
use shelf_core::{CacheKey, MembershipId};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Cache of resolved list content
///
/// Shared as `Arc<ContentCache>` between every view and the mutation
/// controller. Writers are successful resolutions and optimistic
/// removals/rollbacks; the last writer wins.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: RwLock<HashMap<CacheKey, Vec<SharedItem>>>,
}

impl ContentCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of an entry's items (cheap: items are `Arc`s)
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<SharedItem>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Insert or replace an entry
    pub async fn put(&self, key: CacheKey, items: Vec<SharedItem>) {
        debug!(key = %key, items = items.len(), "Caching list content");
        self.entries.write().await.insert(key, items);
    }

    /// Insert or replace an entry unless `cancel` has fired.
    ///
    /// The token is checked while the write lock is held, so a call
    /// cancelled before this point never lands in the cache.
    pub async fn put_unless_cancelled(
        &self,
        key: CacheKey,
        items: Vec<SharedItem>,
        cancel: &CancellationToken,
    ) -> bool {
        let mut entries = self.entries.write().await;
        if cancel.is_cancelled() {
            debug!(key = %key, "Discarding content of cancelled load");
            return false;
        }
        entries.insert(key, items);
        true
    }

    /// Drop an entry. Returns whether one existed.
    pub async fn invalidate(&self, key: &CacheKey) -> bool {
        let removed = self.entries.write().await.remove(key).is_some();
        if removed {
            debug!(key = %key, "Invalidated cached list content");
        }
        removed
    }

    /// Remove one item from an entry, returning its index and the item
    pub async fn remove_item(
        &self,
        key: &CacheKey,
        membership_id: MembershipId,
    ) -> Option<(usize, SharedItem)> {
        let mut entries = self.entries.write().await;
        let items = entries.get_mut(key)?;
        let index = items.iter().position(|i| i.internal_id == membership_id)?;
        Some((index, items.remove(index)))
    }

    /// Reinsert an item at `index` (clamped to the entry length).
    ///
    /// No-op if the entry is gone (the list was invalidated meanwhile) or
    /// the membership is already present.
    pub async fn restore_item(&self, key: &CacheKey, index: usize, item: SharedItem) {
        let mut entries = self.entries.write().await;
        let Some(items) = entries.get_mut(key) else {
            debug!(key = %key, "Skipping restore into invalidated entry");
            return;
        };

        if items.iter().any(|i| i.internal_id == item.internal_id) {
            return;
        }

        let index = index.min(items.len());
        items.insert(index, item);
    }

    /// Drop every entry (session end)
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached lists
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
