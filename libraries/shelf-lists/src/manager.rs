//! List metadata management
//!
//! Caller-side façade over the `ListRegistry`: rejects bad input before any
//! network call and keeps the content cache honest when lists are deleted
//! or renamed.

use crate::cache::ContentCache;
use shelf_core::{validate_list_input, ListMetadata, ListRegistry, OwnerId, Result};
use std::sync::Arc;
use tracing::info;

/// Manages a user's custom lists
pub struct ListManager {
    registry: Arc<dyn ListRegistry>,
    cache: Arc<ContentCache>,
}

impl ListManager {
    /// Create a manager over a registry and the shared content cache
    pub fn new(registry: Arc<dyn ListRegistry>, cache: Arc<ContentCache>) -> Self {
        Self { registry, cache }
    }

    /// Get all lists of an owner
    pub async fn lists_for_owner(&self, owner_id: OwnerId) -> Result<Vec<ListMetadata>> {
        self.registry.lists_for_owner(owner_id).await
    }

    /// Create a list. The name is trimmed; oversized input is rejected.
    pub async fn create_list(
        &self,
        owner_id: OwnerId,
        name: &str,
        description: &str,
    ) -> Result<ListMetadata> {
        let name = validate_list_input(name, description)?;

        let list = self
            .registry
            .create_list(owner_id, name, description)
            .await?;

        info!(list_id = %list.id, owner_id = %owner_id, name = %list.name, "List created");
        Ok(list)
    }

    /// Rename a list and/or change its description.
    ///
    /// Content cached under the old name is dropped on rename.
    pub async fn update_list(
        &self,
        list: &ListMetadata,
        name: &str,
        description: &str,
    ) -> Result<ListMetadata> {
        let name = validate_list_input(name, description)?;

        let updated = self.registry.update_list(list.id, name, description).await?;

        if updated.name != list.name {
            self.cache.invalidate(&list.cache_key()).await;
            info!(list_id = %list.id, from = %list.name, to = %updated.name, "List renamed");
        } else {
            info!(list_id = %list.id, "List updated");
        }

        Ok(updated)
    }

    /// Delete a list and drop its cached content.
    ///
    /// Memberships are removed by the backing store, not here.
    pub async fn delete_list(&self, list: &ListMetadata) -> Result<()> {
        self.registry.delete_list(list.id).await?;
        self.cache.invalidate(&list.cache_key()).await;

        info!(list_id = %list.id, name = %list.name, "List deleted");
        Ok(())
    }
}

impl std::fmt::Debug for ListManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListManager").finish_non_exhaustive()
    }
}
