//! Main Shelf API client.

use crate::error::{ClientError, Result};
use crate::http::{build_http_client, normalize_base_url};
use crate::lists::ListsClient;
use crate::types::ApiConfig;
use async_trait::async_trait;
use reqwest::Client;
use shelf_core::{
    CancellationToken, ListId, ListMetadata, ListRegistry, MediaKind, MembershipRecord, OwnerId,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Main client for the Shelf list API.
///
/// The bearer credential is supplied by the session layer through
/// [`set_token`](Self::set_token); every list call fails with
/// `AuthRequired` before touching the network while it is absent.
///
/// # Example
///
/// ```ignore
/// use shelf_client::{ApiConfig, ShelfApiClient};
///
/// let client = ShelfApiClient::new(ApiConfig::with_token("https://api.shelf.example", token))?;
/// let lists = client.lists().await?.client().get_lists(owner).await?;
/// ```
pub struct ShelfApiClient {
    http: Client,
    config: Arc<RwLock<ApiConfig>>,
}

impl ShelfApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let url = normalize_base_url(&config.url)?;

        let normalized_config = ApiConfig {
            url,
            access_token: config.access_token,
        };

        Ok(Self {
            http: build_http_client()?,
            config: Arc::new(RwLock::new(normalized_config)),
        })
    }

    /// Get the API base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Set the bearer token (e.g., after the session layer logs in).
    pub async fn set_token(&self, access_token: impl Into<String>) {
        let mut config = self.config.write().await;
        config.access_token = Some(access_token.into());
    }

    /// Clear the stored token (logout).
    pub async fn clear_token(&self) {
        let mut config = self.config.write().await;
        config.access_token = None;
        info!("Cleared API token");
    }

    /// Get a lists client for list and membership operations.
    ///
    /// Returns an error if not authenticated.
    pub async fn lists(&self) -> Result<ListsClientHandle> {
        let config = self.config.read().await;
        let access_token = config
            .access_token
            .clone()
            .ok_or(ClientError::AuthRequired)?;
        let url = config.url.clone();
        drop(config);

        Ok(ListsClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        })
    }
}

/// Handle for list operations.
///
/// Returned by `ShelfApiClient::lists()`; holds a snapshot of the URL and
/// token taken when it was created.
pub struct ListsClientHandle {
    http: Client,
    url: String,
    access_token: String,
}

impl ListsClientHandle {
    /// Get the lists client.
    pub fn client(&self) -> ListsClient<'_> {
        ListsClient::new(&self.http, &self.url, &self.access_token)
    }
}

#[async_trait]
impl ListRegistry for ShelfApiClient {
    async fn create_list(
        &self,
        owner_id: OwnerId,
        name: &str,
        description: &str,
    ) -> shelf_core::Result<ListMetadata> {
        let handle = self.lists().await?;
        Ok(handle.client().create_list(owner_id, name, description).await?)
    }

    async fn update_list(
        &self,
        id: ListId,
        name: &str,
        description: &str,
    ) -> shelf_core::Result<ListMetadata> {
        let handle = self.lists().await?;
        Ok(handle.client().update_list(id, name, description).await?)
    }

    async fn delete_list(&self, id: ListId) -> shelf_core::Result<()> {
        let handle = self.lists().await?;
        Ok(handle.client().delete_list(id).await?)
    }

    async fn lists_for_owner(&self, owner_id: OwnerId) -> shelf_core::Result<Vec<ListMetadata>> {
        let handle = self.lists().await?;
        Ok(handle.client().get_lists(owner_id).await?)
    }

    async fn memberships_for_list(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        cancel: &CancellationToken,
    ) -> shelf_core::Result<Vec<MembershipRecord>> {
        let handle = self.lists().await?;
        Ok(handle
            .client()
            .get_memberships(owner_id, list_name, cancel)
            .await?)
    }

    async fn add_membership(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        media_id: &str,
        media_kind: MediaKind,
    ) -> shelf_core::Result<()> {
        let handle = self.lists().await?;
        Ok(handle
            .client()
            .add_membership(owner_id, list_name, media_id, media_kind)
            .await?)
    }

    async fn remove_membership(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        media_id: &str,
        media_kind: MediaKind,
    ) -> shelf_core::Result<()> {
        let handle = self.lists().await?;
        Ok(handle
            .client()
            .remove_membership(owner_id, list_name, media_id, media_kind)
            .await?)
    }
}
