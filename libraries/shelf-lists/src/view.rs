//! Active list view
//!
//! `ListViewController` is the single owner of the cancellation token for
//! the list being shown. Opening another list or closing the view cancels
//! whatever load is still running; a cancelled load writes neither the
//! cache nor the display.

use crate::content::ContentService;
use crate::display::DisplayedList;
use crate::mutation::{AddOutcome, MutationController, Presence};
use crate::SharedItem;
use shelf_core::{CacheKey, MediaKind, MembershipId, OwnerId, Result, ShelfError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct Session {
    key: Option<CacheKey>,
    cancel: CancellationToken,
    closed: bool,
}

/// Controller of one list view
pub struct ListViewController {
    content: Arc<ContentService>,
    mutations: Arc<MutationController>,
    locale: String,
    display: DisplayedList,
    session: Mutex<Session>,
}

impl ListViewController {
    /// Create a view resolving media in `locale`
    pub fn new(
        content: Arc<ContentService>,
        mutations: Arc<MutationController>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            content,
            mutations,
            locale: locale.into(),
            display: DisplayedList::new(),
            session: Mutex::new(Session {
                key: None,
                cancel: CancellationToken::new(),
                closed: false,
            }),
        }
    }

    /// The displayed collection
    pub fn display(&self) -> &DisplayedList {
        &self.display
    }

    /// List currently open, if any
    pub async fn active(&self) -> Option<CacheKey> {
        let session = self.session.lock().await;
        if session.closed {
            None
        } else {
            session.key.clone()
        }
    }

    /// Open a list, replacing whatever was shown.
    ///
    /// Returns `Cancelled` if another `open` or a `close` superseded this one
    /// before it finished.
    pub async fn open(&self, owner_id: OwnerId, list_name: &str) -> Result<Vec<SharedItem>> {
        let key = CacheKey::new(owner_id, list_name);
        let (cancel, generation) = self.start(key.clone()).await;

        info!(key = %key, generation, "Opening list");
        self.run_load(key, generation, cancel, false).await
    }

    /// Re-resolve the open list, bypassing the cache
    pub async fn refresh(&self) -> Result<Vec<SharedItem>> {
        let key = self.require_active().await?;
        let (cancel, generation) = self.start(key.clone()).await;

        info!(key = %key, generation, "Refreshing list");
        self.run_load(key, generation, cancel, true).await
    }

    /// Cancel any in-flight load and tear the view down
    pub async fn close(&self) {
        let mut session = self.session.lock().await;
        session.cancel.cancel();
        session.closed = true;
        debug!(key = ?session.key, "List view closed");
    }

    /// Remove a displayed item from the open list, optimistically
    pub async fn remove_item(&self, membership_id: MembershipId) -> Result<()> {
        let key = self.require_active().await?;

        let item = self
            .display
            .find(membership_id)
            .await
            .ok_or_else(|| ShelfError::not_found("List item", membership_id.to_string()))?;

        self.mutations
            .remove_item(&self.display, key.owner_id, &key.list_name, membership_id, item)
            .await
    }

    /// Add a media item to the open list; the list is reloaded on success.
    pub async fn add_item(&self, media_id: &str, media_kind: MediaKind) -> AddOutcome {
        let key = match self.require_active().await {
            Ok(key) => key,
            Err(e) => return AddOutcome::Failed(e),
        };

        let outcome = self
            .mutations
            .add_item(key.owner_id, &key.list_name, media_id, media_kind)
            .await;

        if outcome.is_added() {
            let cancel = self.session.lock().await.cancel.clone();
            let generation = self.display.generation().await;
            match self.load(&key, &cancel, true).await {
                Ok(items) => {
                    self.display.publish(generation, items, &cancel).await;
                }
                Err(ShelfError::Cancelled) => {}
                Err(e) => {
                    warn!(key = %key, error = %e, "Reload after add failed");
                }
            }
        }

        outcome
    }

    /// Presence of a membership in the open list
    pub async fn presence(&self, membership_id: MembershipId) -> Presence {
        self.mutations.presence(&self.display, membership_id).await
    }

    /// Swap in a fresh token and generation for `key`
    async fn start(&self, key: CacheKey) -> (CancellationToken, u64) {
        let mut session = self.session.lock().await;
        session.cancel.cancel();
        session.cancel = CancellationToken::new();
        session.key = Some(key.clone());
        session.closed = false;

        let generation = self.display.begin(key).await;
        (session.cancel.clone(), generation)
    }

    async fn run_load(
        &self,
        key: CacheKey,
        generation: u64,
        cancel: CancellationToken,
        fresh: bool,
    ) -> Result<Vec<SharedItem>> {
        match self.load(&key, &cancel, fresh).await {
            Ok(items) => {
                if self.display.publish(generation, items.clone(), &cancel).await {
                    info!(key = %key, items = items.len(), "List ready");
                    Ok(items)
                } else {
                    Err(ShelfError::Cancelled)
                }
            }
            Err(ShelfError::Cancelled) => {
                debug!(key = %key, generation, "List load superseded");
                Err(ShelfError::Cancelled)
            }
            Err(e) => {
                self.display.fail(generation, e.to_string(), &cancel).await;
                warn!(key = %key, error = %e, "Failed to load list");
                Err(e)
            }
        }
    }

    async fn load(
        &self,
        key: &CacheKey,
        cancel: &CancellationToken,
        fresh: bool,
    ) -> Result<Vec<SharedItem>> {
        let owner_id = key.owner_id;
        let list_name = key.list_name.as_str();

        // Dropping the load future on cancellation abandons its pending writes
        let items = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ShelfError::Cancelled),
            result = async {
                if fresh {
                    self.content.reload(owner_id, list_name, &self.locale, cancel).await
                } else {
                    self.content.load(owner_id, list_name, &self.locale, cancel).await
                }
            } => result,
        }?;

        // The server still lists items whose removal has not been confirmed
        Ok(self.mutations.without_pending(items))
    }

    async fn require_active(&self) -> Result<CacheKey> {
        self.active()
            .await
            .ok_or_else(|| ShelfError::invalid_input("No list is open"))
    }
}

impl std::fmt::Debug for ListViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListViewController")
            .field("locale", &self.locale)
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}
