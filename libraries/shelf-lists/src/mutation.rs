//! Adding and removing list members
//!
//! Removal is optimistic: the item leaves the displayed list and the cache
//! before the network call, and is put back (same `Arc`, original index) if
//! the call fails. Adding is not optimistic; callers reload on success.
//!
//! Presence of one membership as seen here:
//!
//! ```text
//! Present ──remove_item()──▶ PendingRemoval ──ok──▶ Absent
//!    ▲                             │
//!    └───────────── fail ──────────┘
//! ```

use crate::cache::ContentCache;
use crate::display::DisplayedList;
use crate::transaction::{Compensation, Transaction};
use crate::SharedItem;
use async_trait::async_trait;
use shelf_core::{
    is_valid_membership, CacheKey, ListRegistry, MediaKind, MembershipId, MembershipRecord,
    OwnerId, Result, ShelfError,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Outcome of adding an item to a list
#[derive(Debug)]
pub enum AddOutcome {
    /// The server accepted the item
    Added,
    /// The list already holds the item
    Duplicate,
    /// Rejected locally or by the server for any other reason
    Failed(ShelfError),
}

impl AddOutcome {
    /// Check if the item was added
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }
}

/// Presence of one membership as seen by the mutation controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Displayed and not being removed
    Present,
    /// Removed locally, network call in flight
    PendingRemoval,
    /// Not displayed
    Absent,
}

/// Performs list membership mutations
pub struct MutationController {
    registry: Arc<dyn ListRegistry>,
    cache: Arc<ContentCache>,
    pending_removals: Arc<Mutex<HashSet<MembershipId>>>,
}

impl MutationController {
    /// Create a controller writing through `registry` and into `cache`
    pub fn new(registry: Arc<dyn ListRegistry>, cache: Arc<ContentCache>) -> Self {
        Self {
            registry,
            cache,
            pending_removals: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Add a media item to a list.
    ///
    /// Does not touch the cache; reload the list on `Added`.
    pub async fn add_item(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        media_id: &str,
        media_kind: MediaKind,
    ) -> AddOutcome {
        if list_name.trim().is_empty() {
            return AddOutcome::Failed(ShelfError::invalid_input("List name cannot be empty"));
        }

        // Same checks the loader applies, so nothing is added that would be dropped on load
        let candidate = MembershipRecord::new(
            MembershipId::new(0),
            owner_id,
            list_name,
            media_id,
            media_kind,
        );
        if !is_valid_membership(&candidate) {
            return AddOutcome::Failed(ShelfError::invalid_input(format!(
                "Invalid {} id: {:?}",
                media_kind, media_id
            )));
        }

        match self
            .registry
            .add_membership(owner_id, list_name, media_id, media_kind)
            .await
        {
            Ok(()) => {
                info!(list_name = %list_name, media_id = %media_id, media_kind = %media_kind, "Item added");
                AddOutcome::Added
            }
            Err(ShelfError::Conflict(_)) => {
                debug!(list_name = %list_name, media_id = %media_id, "Item already in list");
                AddOutcome::Duplicate
            }
            Err(e) => {
                warn!(list_name = %list_name, media_id = %media_id, error = %e, "Failed to add item");
                AddOutcome::Failed(e)
            }
        }
    }

    /// Remove an item from a list, optimistically.
    ///
    /// `view` and the cache entry lose the item before the network call. On
    /// failure both get the same item back at its original index and the
    /// error is returned. A second removal of a membership whose removal has
    /// not settled is rejected with `RemovalInProgress`.
    ///
    /// Dropping the returned future before it settles rolls the local
    /// removal back.
    pub async fn remove_item(
        &self,
        view: &DisplayedList,
        owner_id: OwnerId,
        list_name: &str,
        membership_id: MembershipId,
        item: SharedItem,
    ) -> Result<()> {
        if item.internal_id != membership_id {
            return Err(ShelfError::invalid_input(format!(
                "Item {} does not belong to membership {}",
                item.internal_id, membership_id
            )));
        }

        let Some(slot) = PendingSlot::acquire(&self.pending_removals, membership_id) else {
            debug!(membership_id = %membership_id, "Removal already in flight");
            return Err(ShelfError::RemovalInProgress(membership_id));
        };

        let key = CacheKey::new(owner_id, list_name);
        let mut tx = Transaction::begin("remove_item");
        // Recorded first so it is released last, after any restore
        tx.record(slot);

        if let Some((index, removed)) = view.remove_item(&key, membership_id).await {
            tx.record(RestoreDisplayed {
                view: view.clone(),
                key: key.clone(),
                index,
                item: removed,
            });
        }
        if let Some((index, removed)) = self.cache.remove_item(&key, membership_id).await {
            tx.record(RestoreCached {
                cache: Arc::clone(&self.cache),
                key: key.clone(),
                index,
                item: removed,
            });
        }

        debug!(
            key = %key,
            membership_id = %membership_id,
            effects = tx.len(),
            "Removed item locally, confirming with server"
        );

        let result = self
            .registry
            .remove_membership(owner_id, list_name, &item.media_id, item.kind())
            .await;

        if result.is_ok() {
            // A reload during the call may have put the item back
            view.remove_item(&key, membership_id).await;
            self.cache.remove_item(&key, membership_id).await;
        }

        let result = tx.settle(result).await;

        match &result {
            Ok(()) => info!(key = %key, membership_id = %membership_id, "Item removed"),
            Err(e) => warn!(
                key = %key,
                membership_id = %membership_id,
                error = %e,
                "Item removal failed, restored locally"
            ),
        }

        result
    }

    /// Check if a removal of `membership_id` has not settled yet
    pub fn is_pending(&self, membership_id: MembershipId) -> bool {
        self.pending_removals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&membership_id)
    }

    /// Drop items whose removal is in flight from freshly loaded content
    pub fn without_pending(&self, mut items: Vec<SharedItem>) -> Vec<SharedItem> {
        let pending = self
            .pending_removals
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !pending.is_empty() {
            items.retain(|item| !pending.contains(&item.internal_id));
        }
        items
    }

    /// Presence of a membership in `view`
    pub async fn presence(&self, view: &DisplayedList, membership_id: MembershipId) -> Presence {
        if self.is_pending(membership_id) {
            Presence::PendingRemoval
        } else if view.contains(membership_id).await {
            Presence::Present
        } else {
            Presence::Absent
        }
    }
}

impl std::fmt::Debug for MutationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationController").finish_non_exhaustive()
    }
}

/// Marks a membership as `PendingRemoval` until dropped
struct PendingSlot {
    pending: Arc<Mutex<HashSet<MembershipId>>>,
    membership_id: MembershipId,
}

impl PendingSlot {
    fn acquire(
        pending: &Arc<Mutex<HashSet<MembershipId>>>,
        membership_id: MembershipId,
    ) -> Option<Self> {
        let inserted = pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(membership_id);

        inserted.then(|| Self {
            pending: Arc::clone(pending),
            membership_id,
        })
    }
}

impl Drop for PendingSlot {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.membership_id);
    }
}

// Nothing to revert; dropping the slot releases it.
#[async_trait]
impl Compensation for PendingSlot {
    async fn compensate(self: Box<Self>) {}
}

struct RestoreDisplayed {
    view: DisplayedList,
    key: CacheKey,
    index: usize,
    item: SharedItem,
}

#[async_trait]
impl Compensation for RestoreDisplayed {
    async fn compensate(self: Box<Self>) {
        let Self {
            view,
            key,
            index,
            item,
        } = *self;
        view.restore_item(&key, index, item).await;
    }
}

struct RestoreCached {
    cache: Arc<ContentCache>,
    key: CacheKey,
    index: usize,
    item: SharedItem,
}

#[async_trait]
impl Compensation for RestoreCached {
    async fn compensate(self: Box<Self>) {
        let Self {
            cache,
            key,
            index,
            item,
        } = *self;
        cache.restore_item(&key, index, item).await;
    }
}
