//! List content resolution
//!
//! Turns a list's membership records into display-ready items:
//!
//! ```text
//! memberships ─▶ validator ─▶ providers (concurrent) ─▶ ordered gather ─▶ items
//! ```
//!
//! `ContentService` puts the session cache in front of the resolver
//! (cache-aside).

use crate::cache::ContentCache;
use crate::resolvers::ResolverSet;
use crate::SharedItem;
use futures_util::future::join_all;
use shelf_core::{
    retain_valid, CacheKey, ListRegistry, OwnerId, ResolvedMediaItem, Result, ShelfError,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Resolves membership records into hydrated items
#[derive(Clone)]
pub struct ContentResolver {
    registry: Arc<dyn ListRegistry>,
    resolvers: Arc<ResolverSet>,
}

impl ContentResolver {
    /// Create a resolver over a registry and a provider set
    pub fn new(registry: Arc<dyn ListRegistry>, resolvers: Arc<ResolverSet>) -> Self {
        Self {
            registry,
            resolvers,
        }
    }

    /// Resolve the content of one list.
    ///
    /// Items come back in membership order. Invalid records and items whose
    /// provider failed are omitted. Fails only when the membership fetch
    /// fails or `cancel` fires.
    pub async fn resolve_list_content(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        locale: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SharedItem>> {
        if cancel.is_cancelled() {
            return Err(ShelfError::Cancelled);
        }

        let records = self
            .registry
            .memberships_for_list(owner_id, list_name, cancel)
            .await?;
        let fetched = records.len();
        let records = retain_valid(records);

        // join_all yields outputs in input order regardless of completion order
        let lookups = records.iter().map(|record| async move {
            let media_id = record.media_id()?;
            let details = self
                .resolvers
                .resolve(record.media_kind, media_id, locale, cancel)
                .await?;
            Some(Arc::new(ResolvedMediaItem::new(
                record.membership_id,
                media_id,
                details,
            )))
        });
        let resolved = join_all(lookups).await;

        if cancel.is_cancelled() {
            debug!(owner_id = %owner_id, list_name = %list_name, "List resolution cancelled");
            return Err(ShelfError::Cancelled);
        }

        let items: Vec<SharedItem> = resolved.into_iter().flatten().collect();

        info!(
            owner_id = %owner_id,
            list_name = %list_name,
            fetched,
            valid = records.len(),
            resolved = items.len(),
            "Resolved list content"
        );

        Ok(items)
    }
}

impl std::fmt::Debug for ContentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentResolver")
            .field("resolvers", &self.resolvers)
            .finish_non_exhaustive()
    }
}

/// Cache-aside access to list content
#[derive(Debug, Clone)]
pub struct ContentService {
    resolver: ContentResolver,
    cache: Arc<ContentCache>,
}

impl ContentService {
    /// Create a service over a resolver and a shared cache
    pub fn new(resolver: ContentResolver, cache: Arc<ContentCache>) -> Self {
        Self { resolver, cache }
    }

    /// The shared cache
    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// Load list content, from cache when possible.
    ///
    /// A hit issues no network calls. A miss resolves and writes the result
    /// into the cache, unless `cancel` fired in the meantime.
    pub async fn load(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        locale: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SharedItem>> {
        let key = CacheKey::new(owner_id, list_name);

        if let Some(items) = self.cache.get(&key).await {
            debug!(key = %key, items = items.len(), "List content cache hit");
            return Ok(items);
        }

        debug!(key = %key, "List content cache miss");
        self.reload(owner_id, list_name, locale, cancel).await
    }

    /// Resolve list content bypassing the cache read, then refresh the entry.
    pub async fn reload(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        locale: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SharedItem>> {
        let items = self
            .resolver
            .resolve_list_content(owner_id, list_name, locale, cancel)
            .await?;

        let key = CacheKey::new(owner_id, list_name);
        if !self
            .cache
            .put_unless_cancelled(key, items.clone(), cancel)
            .await
        {
            return Err(ShelfError::Cancelled);
        }

        Ok(items)
    }
}
