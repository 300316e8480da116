//! Core traits for Shelf
//!
//! These are the seams between the list-management core and the network.
//! `shelf-client` implements them over HTTP; tests implement them with fakes.

use crate::error::Result;
use crate::types::{ListId, ListMetadata, MediaDetails, MediaKind, MembershipRecord, OwnerId};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// List registry
///
/// CRUD over list metadata plus the membership endpoints. Implementations
/// never truncate input and never cascade locally; every failure surfaces as
/// a `ShelfError`.
#[async_trait]
pub trait ListRegistry: Send + Sync {
    // List operations

    /// Create a new list for an owner
    async fn create_list(
        &self,
        owner_id: OwnerId,
        name: &str,
        description: &str,
    ) -> Result<ListMetadata>;

    /// Rename a list and/or replace its description
    async fn update_list(&self, id: ListId, name: &str, description: &str) -> Result<ListMetadata>;

    /// Delete a list; the backing store drops its memberships
    async fn delete_list(&self, id: ListId) -> Result<()>;

    /// Get all lists of an owner
    async fn lists_for_owner(&self, owner_id: OwnerId) -> Result<Vec<ListMetadata>>;

    // Membership operations

    /// Get the raw membership records of one list
    ///
    /// Returns `ShelfError::Cancelled` if `cancel` fires first.
    async fn memberships_for_list(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<MembershipRecord>>;

    /// Add a media item to a list
    ///
    /// A duplicate is reported as `ShelfError::Conflict`.
    async fn add_membership(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        media_id: &str,
        media_kind: MediaKind,
    ) -> Result<()>;

    /// Remove a media item from a list
    async fn remove_membership(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        media_id: &str,
        media_kind: MediaKind,
    ) -> Result<()>;
}

/// Metadata provider for one media kind
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// The kind of media this provider resolves
    fn kind(&self) -> MediaKind;

    /// Fetch display metadata for a provider-specific id
    ///
    /// Providers that have no localized data may ignore `locale`.
    async fn fetch(
        &self,
        media_id: &str,
        locale: &str,
        cancel: &CancellationToken,
    ) -> Result<MediaDetails>;
}
