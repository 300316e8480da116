//! List and membership endpoints of the Shelf API.

use crate::error::{ClientError, Result};
use crate::http::{cancellable, check_status, endpoint, read_json, send};
use crate::types::{CreateListRequest, MembershipRequest, UpdateListRequest};
use reqwest::Client;
use shelf_core::{ListId, ListMetadata, MediaKind, MembershipRecord, OwnerId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// List client for the Shelf API.
pub struct ListsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> ListsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get all lists of an owner.
    pub async fn get_lists(&self, owner_id: OwnerId) -> Result<Vec<ListMetadata>> {
        let url = endpoint(self.base_url, &["lists", &owner_id.to_string()])?;
        debug!(url = %url, owner_id = %owner_id, "Fetching lists");

        let response = send(self.http.get(url).bearer_auth(self.access_token)).await?;
        let response = check_status(response, &format!("lists of owner {}", owner_id)).await?;
        let lists: Vec<ListMetadata> = read_json(response, "lists response").await?;

        debug!(owner_id = %owner_id, lists = lists.len(), "Fetched lists");
        Ok(lists)
    }

    /// Create a list.
    pub async fn create_list(
        &self,
        owner_id: OwnerId,
        name: &str,
        description: &str,
    ) -> Result<ListMetadata> {
        let url = endpoint(self.base_url, &["lists"])?;
        debug!(url = %url, owner_id = %owner_id, name = %name, "Creating list");

        let request = CreateListRequest {
            owner_id,
            name,
            description,
        };

        let response = send(
            self.http
                .post(url)
                .bearer_auth(self.access_token)
                .json(&request),
        )
        .await?;
        let response = check_status(response, &format!("list {}", name)).await?;
        let list: ListMetadata = read_json(response, "created list").await?;

        debug!(list_id = %list.id, "List created");
        Ok(list)
    }

    /// Update a list's name and description.
    pub async fn update_list(
        &self,
        list_id: ListId,
        name: &str,
        description: &str,
    ) -> Result<ListMetadata> {
        let url = endpoint(self.base_url, &["lists", &list_id.to_string()])?;
        debug!(url = %url, list_id = %list_id, "Updating list");

        let request = UpdateListRequest { name, description };

        let response = send(
            self.http
                .put(url)
                .bearer_auth(self.access_token)
                .json(&request),
        )
        .await?;
        let response = check_status(response, &format!("list {}", list_id)).await?;
        read_json(response, "updated list").await
    }

    /// Delete a list.
    ///
    /// A missing list is reported as `NotFound`, not treated as success.
    pub async fn delete_list(&self, list_id: ListId) -> Result<()> {
        let url = endpoint(self.base_url, &["lists", &list_id.to_string()])?;
        debug!(url = %url, list_id = %list_id, "Deleting list");

        let response = send(self.http.delete(url).bearer_auth(self.access_token)).await?;
        check_status(response, &format!("list {}", list_id)).await?;

        debug!(list_id = %list_id, "List deleted");
        Ok(())
    }

    /// Get the membership records of one list.
    ///
    /// Records that fail to decode are skipped so one corrupt row does not
    /// abort the whole load.
    pub async fn get_memberships(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<MembershipRecord>> {
        let url = endpoint(self.base_url, &["lists", &owner_id.to_string(), "content"])?;
        debug!(url = %url, owner_id = %owner_id, list_name = %list_name, "Fetching memberships");

        let request = self
            .http
            .get(url)
            .query(&[("list_name", list_name)])
            .bearer_auth(self.access_token);

        let rows: Vec<serde_json::Value> = cancellable(cancel, async {
            let response = send(request).await?;
            let response = check_status(response, &format!("list {}", list_name)).await?;
            read_json(response, "membership response").await
        })
        .await?;

        let total = rows.len();
        let records: Vec<MembershipRecord> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<MembershipRecord>(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(list_name = %list_name, error = %e, "Skipping undecodable membership");
                    None
                }
            })
            .collect();

        debug!(
            list_name = %list_name,
            records = records.len(),
            skipped = total - records.len(),
            "Fetched memberships"
        );

        Ok(records)
    }

    /// Add a media item to a list.
    ///
    /// A duplicate is reported as `ClientError::Conflict`.
    pub async fn add_membership(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        media_id: &str,
        media_kind: MediaKind,
    ) -> Result<()> {
        let url = endpoint(self.base_url, &["lists", "content"])?;
        debug!(
            url = %url,
            list_name = %list_name,
            media_id = %media_id,
            media_kind = %media_kind,
            "Adding membership"
        );

        let request = MembershipRequest {
            owner_id,
            media_id,
            media_kind,
            list_name,
        };

        let response = send(
            self.http
                .post(url)
                .bearer_auth(self.access_token)
                .json(&request),
        )
        .await?;

        match check_status(response, &format!("{} {}", media_kind, media_id)).await {
            Ok(_) => Ok(()),
            Err(ClientError::Conflict(msg)) => {
                debug!(media_id = %media_id, "Membership already exists");
                Err(ClientError::Conflict(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// Remove a media item from a list.
    pub async fn remove_membership(
        &self,
        owner_id: OwnerId,
        list_name: &str,
        media_id: &str,
        media_kind: MediaKind,
    ) -> Result<()> {
        let url = endpoint(self.base_url, &["lists", "content"])?;
        debug!(url = %url, list_name = %list_name, media_id = %media_id, "Removing membership");

        let request = MembershipRequest {
            owner_id,
            media_id,
            media_kind,
            list_name,
        };

        let response = send(
            self.http
                .delete(url)
                .bearer_auth(self.access_token)
                .json(&request),
        )
        .await?;
        check_status(response, &format!("{} {} in {}", media_kind, media_id, list_name)).await?;

        debug!(media_id = %media_id, "Membership removed");
        Ok(())
    }
}
