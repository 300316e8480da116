//! Shelf Core
//!
//! Platform-agnostic types, traits, and error handling for Shelf custom lists.
//!
//! A custom list is a named, user-owned collection mixing movies, series and
//! albums. The server stores lists as lightweight membership records; this
//! crate defines those records, the hydrated display objects they resolve to,
//! and the seams (`ListRegistry`, `MediaProvider`) the rest of the workspace
//! plugs network implementations into.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `ListMetadata`, `MembershipRecord`, `MediaDetails`, `ResolvedMediaItem`
//! - **Core Traits**: `ListRegistry`, `MediaProvider`
//! - **Validation**: `is_valid_membership` and list input bounds
//! - **Error Handling**: Unified `ShelfError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shelf_core::types::{MediaKind, MembershipId, MembershipRecord, OwnerId};
//! use shelf_core::validator::is_valid_membership;
//!
//! let record = MembershipRecord::new(
//!     MembershipId::new(7),
//!     OwnerId::new(1),
//!     "Weekend",
//!     "1399",
//!     MediaKind::Series,
//! );
//! assert!(is_valid_membership(&record));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use error::{Result, ShelfError};
pub use traits::{ListRegistry, MediaProvider};
pub use validator::{is_valid_membership, retain_valid, validate_list_input};

pub use types::{
    CacheKey, ListId, ListMetadata, MediaDetails, MediaKind, MembershipId, MembershipRecord,
    OwnerId, ResolvedMediaItem, LIST_DESCRIPTION_MAX_LEN, LIST_NAME_MAX_LEN,
};

/// Re-exported so implementors of the core traits share one token type.
pub use tokio_util::sync::CancellationToken;
