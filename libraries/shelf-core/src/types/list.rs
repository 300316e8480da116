/// Custom list domain types
use crate::types::{ListId, OwnerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of characters in a list name (after trimming)
pub const LIST_NAME_MAX_LEN: usize = 50;

/// Maximum number of characters in a list description
pub const LIST_DESCRIPTION_MAX_LEN: usize = 50;

/// Custom list metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMetadata {
    /// Unique list identifier
    pub id: ListId,

    /// Owner user ID
    pub owner_id: OwnerId,

    /// List name, unique per owner
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl ListMetadata {
    /// Create list metadata (for loading server responses in tests and fakes)
    pub fn new(
        id: ListId,
        owner_id: OwnerId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Cache key addressing this list's resolved content
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.owner_id, self.name.clone())
    }
}

/// Key of a content cache entry: one list of one owner
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Owner user ID
    pub owner_id: OwnerId,

    /// List name
    pub list_name: String,
}

impl CacheKey {
    /// Create a cache key
    pub fn new(owner_id: OwnerId, list_name: impl Into<String>) -> Self {
        Self {
            owner_id,
            list_name: list_name.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner_id, self.list_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_missing_description_defaults_to_empty() {
        let list: ListMetadata =
            serde_json::from_str(r#"{"id": 1, "owner_id": 2, "name": "Noir"}"#).unwrap();

        assert_eq!(list.name, "Noir");
        assert_eq!(list.description, "");
        assert_eq!(list.cache_key(), CacheKey::new(OwnerId::new(2), "Noir"));
    }

    #[test]
    fn cache_key_display() {
        let key = CacheKey::new(OwnerId::new(9), "Road trip");
        assert_eq!(key.to_string(), "9/Road trip");
    }
}
