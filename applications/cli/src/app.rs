/// Wiring of the list engine over the HTTP clients
use crate::config::ShelfConfig;
use shelf_client::{ProviderClients, ShelfApiClient};
use shelf_core::{ListMetadata, ListRegistry, OwnerId, Result, ShelfError};
use shelf_lists::{
    ContentCache, ContentResolver, ContentService, ListManager, ListViewController,
    MutationController, ResolverSet,
};
use std::sync::Arc;

/// Everything one CLI invocation needs
pub struct Shelf {
    pub owner_id: OwnerId,
    pub manager: ListManager,
    pub view: ListViewController,
}

impl Shelf {
    /// Build the clients and services for `owner_id`
    pub fn connect(config: &ShelfConfig, owner_id: OwnerId) -> Result<Self> {
        let registry: Arc<dyn ListRegistry> = Arc::new(ShelfApiClient::new(config.api_config())?);

        let providers = ProviderClients::new(&config.provider_endpoints())?;
        let resolvers = ResolverSet::new(
            Arc::new(providers.movie),
            Arc::new(providers.series),
            Arc::new(providers.album),
        )?;

        let cache = Arc::new(ContentCache::new());
        let resolver = ContentResolver::new(Arc::clone(&registry), Arc::new(resolvers));
        let content = Arc::new(ContentService::new(resolver, Arc::clone(&cache)));
        let mutations = Arc::new(MutationController::new(
            Arc::clone(&registry),
            Arc::clone(&cache),
        ));

        Ok(Self {
            owner_id,
            manager: ListManager::new(registry, cache),
            view: ListViewController::new(content, mutations, config.display.locale.clone()),
        })
    }

    /// Look up one of the owner's lists by id
    pub async fn find_list(&self, id: i64) -> Result<ListMetadata> {
        self.manager
            .lists_for_owner(self.owner_id)
            .await?
            .into_iter()
            .find(|list| list.id.as_i64() == id)
            .ok_or_else(|| ShelfError::not_found("List", id.to_string()))
    }
}
