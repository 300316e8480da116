//! Domain types for Shelf custom lists

mod ids;
mod list;
mod media;
mod membership;

pub use ids::{ListId, MembershipId, OwnerId};
pub use list::{CacheKey, ListMetadata, LIST_DESCRIPTION_MAX_LEN, LIST_NAME_MAX_LEN};
pub use media::{MediaDetails, ResolvedMediaItem};
pub use membership::{MediaKind, MembershipRecord};
