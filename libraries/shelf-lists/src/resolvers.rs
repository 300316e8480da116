//! Per-kind media resolution
//!
//! Dispatches a (kind, media id) pair to the provider registered for that
//! kind. Provider failures are not errors at this level: the item is simply
//! absent from the resolved list.

use shelf_core::{MediaDetails, MediaKind, MediaProvider, Result, ShelfError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One provider per media kind
#[derive(Clone)]
pub struct ResolverSet {
    movie: Arc<dyn MediaProvider>,
    series: Arc<dyn MediaProvider>,
    album: Arc<dyn MediaProvider>,
}

impl ResolverSet {
    /// Register the three providers.
    ///
    /// Fails if a provider is registered under the wrong kind.
    pub fn new(
        movie: Arc<dyn MediaProvider>,
        series: Arc<dyn MediaProvider>,
        album: Arc<dyn MediaProvider>,
    ) -> Result<Self> {
        for (expected, provider) in [
            (MediaKind::Movie, &movie),
            (MediaKind::Series, &series),
            (MediaKind::Album, &album),
        ] {
            if provider.kind() != expected {
                return Err(ShelfError::Config(format!(
                    "{} provider registered for {} items",
                    provider.kind(),
                    expected
                )));
            }
        }

        Ok(Self {
            movie,
            series,
            album,
        })
    }

    /// Provider for a kind
    pub fn provider(&self, kind: MediaKind) -> &Arc<dyn MediaProvider> {
        match kind {
            MediaKind::Movie => &self.movie,
            MediaKind::Series => &self.series,
            MediaKind::Album => &self.album,
        }
    }

    /// Resolve one item; any failure yields `None`.
    pub async fn resolve(
        &self,
        kind: MediaKind,
        media_id: &str,
        locale: &str,
        cancel: &CancellationToken,
    ) -> Option<MediaDetails> {
        match self.provider(kind).fetch(media_id, locale, cancel).await {
            Ok(details) if details.kind() == kind => Some(details),
            Ok(details) => {
                warn!(
                    media_id = %media_id,
                    expected = %kind,
                    got = %details.kind(),
                    "Provider returned metadata of the wrong kind"
                );
                None
            }
            Err(ShelfError::Cancelled) => None,
            Err(e @ (ShelfError::NotFound { .. } | ShelfError::Parse(_))) => {
                debug!(media_id = %media_id, media_kind = %kind, error = %e, "Media unavailable");
                None
            }
            Err(e) => {
                warn!(media_id = %media_id, media_kind = %kind, error = %e, "Media resolution failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for ResolverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverSet").finish_non_exhaustive()
    }
}
