//! Shelf HTTP Client
//!
//! HTTP client library for the Shelf list API and the three media metadata
//! providers.
//!
//! # Features
//!
//! - **Lists**: enumerate, create, rename and delete custom lists
//! - **Memberships**: fetch list content, add and remove items
//! - **Providers**: movie, series and album metadata lookups
//! - **Cancellation**: content and provider fetches race a `CancellationToken`
//!
//! `ShelfApiClient` implements `shelf_core::ListRegistry`; the provider
//! clients implement `shelf_core::MediaProvider`.
//!
//! # Example
//!
//! ```ignore
//! use shelf_client::{ApiConfig, ShelfApiClient};
//! use shelf_core::{ListRegistry, OwnerId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ShelfApiClient::new(ApiConfig::with_token("https://api.shelf.example", "token"))?;
//!
//!     for list in client.lists_for_owner(OwnerId::new(1)).await? {
//!         println!("{} ({})", list.name, list.description);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod http;
mod lists;
mod providers;
mod types;

// Re-export main types
pub use client::{ListsClientHandle, ShelfApiClient};
pub use error::{ClientError, Result};
pub use types::{
    AlbumArtist, AlbumImage, AlbumPayload, ApiConfig, MoviePayload, ProviderEndpoints,
    SeriesPayload,
};

// Re-export sub-clients for direct use if needed
pub use lists::ListsClient;
pub use providers::{AlbumProvider, MovieProvider, ProviderClients, SeriesProvider};
