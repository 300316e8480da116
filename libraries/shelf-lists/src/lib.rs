//! Shelf Lists
//!
//! Client-side engine for custom lists: resolves membership records into
//! display-ready items, caches them per session and keeps the cache and the
//! displayed list consistent while items are added and removed.
//!
//! # Components
//!
//! - [`ResolverSet`]: one `MediaProvider` per media kind
//! - [`ContentResolver`] / [`ContentService`]: concurrent, order-preserving
//!   resolution behind a cache-aside [`ContentCache`]
//! - [`MutationController`]: add, and optimistic remove with rollback
//! - [`ListManager`]: list create/rename/delete with cache invalidation
//! - [`ListViewController`]: owns the active list's cancellation token
//!
//! Items are shared as [`SharedItem`]; the cache and the display hold the
//! same `Arc`, so a rolled back removal restores the identical object.

#![forbid(unsafe_code)]

mod cache;
mod content;
mod display;
mod manager;
mod mutation;
mod resolvers;
mod transaction;
mod view;

use shelf_core::ResolvedMediaItem;
use std::sync::Arc;

pub use cache::ContentCache;
pub use content::{ContentResolver, ContentService};
pub use display::{DisplayedList, LoadStatus};
pub use manager::ListManager;
pub use mutation::{AddOutcome, MutationController, Presence};
pub use resolvers::ResolverSet;
pub use transaction::{Compensation, Transaction};
pub use view::ListViewController;

/// A resolved item as held by the cache and the display
pub type SharedItem = Arc<ResolvedMediaItem>;
